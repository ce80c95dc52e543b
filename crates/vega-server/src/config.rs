use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// JSON config persisted under the data dir. Reads fall back to a
/// generated default which is also written to disk, so the file always
/// exists after the first request.
pub struct ConfigStore {
    path: PathBuf,
    // serializes read-merge-write cycles
    lock: Mutex<()>,
}

impl ConfigStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("config.json"),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Value {
        let _guard = self.lock.lock();
        self.load_locked()
    }

    fn load_locked(&self) -> Value {
        match fs::read_to_string(&self.path)
            .map_err(anyhow::Error::from)
            .and_then(|s| serde_json::from_str(&s).map_err(Into::into))
        {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!("config read failed ({err}), writing default");
                let default = default_config();
                if let Err(err) = self.write(&default) {
                    tracing::error!("failed to write default config: {err}");
                }
                default
            }
        }
    }

    /// Replace each top-level key present in `patch`; untouched keys
    /// keep their persisted value.
    pub fn merge(&self, patch: Map<String, Value>) -> Result<Value> {
        let _guard = self.lock.lock();
        let mut config = self.load_locked();
        if let Value::Object(obj) = &mut config {
            for (k, v) in patch {
                obj.insert(k, v);
            }
        }
        self.write(&config)?;
        Ok(config)
    }

    fn write(&self, value: &Value) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(value)?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

pub fn default_config() -> Value {
    json!({
        "site": {
            "title": "Vega Foundation",
            "theme": "chrome-glass",
            "primaryColor": "#7ef9ff",
            "accentColor": "#e645ff"
        },
        "apis": {
            "openai": { "endpoint": "https://api.openai.com", "key": "set-me" },
            "suno": { "endpoint": "https://api.suno.ai", "key": "set-me" },
            "croc": { "endpoint": "https://api.croc.ai", "key": "set-me" },
            "xai": { "endpoint": "https://api.x.ai", "key": "set-me" }
        },
        "whitepaper": {
            "url": "/data/whitepaper.json",
            "lastUpdated": now_ms()
        },
        "soundscapes": {
            "defaultEngine": "stellar",
            "options": [
                { "id": "stellar", "name": "Stellar Drift", "mode": "8D spatial" },
                { "id": "crystal", "name": "Crystal Bloom", "mode": "live generation" },
                { "id": "orbit", "name": "Orbit Trails", "mode": "dynamic prompts" }
            ]
        },
        "engines": [
            { "id": "vision", "name": "Vision Engine", "status": "synced", "latency": 120,
              "description": "Prompt-to-visual narratives with chrome-glass aesthetic." },
            { "id": "context", "name": "Context Engine", "status": "live", "latency": 80,
              "description": "Memory-backed context flows for web + API." },
            { "id": "story", "name": "Storytelling Engine", "status": "live", "latency": 95,
              "description": "Narrative weaving with safety filters and dynamic cues." },
            { "id": "sound", "name": "Soundscape Engine", "status": "stable", "latency": 60,
              "description": "8D spatial mixing with admin-tuned layers." }
        ],
        "changelog": [
            { "date": now_ms(), "summary": "Autosync bootstrap with API placeholders and admin token guard." },
            { "date": now_ms(), "summary": "Engines unified with status and latency targets." }
        ]
    })
}

/// Read a named JSON data file, generating (and persisting) a default
/// when it is missing or unreadable.
pub fn data_file(data_dir: &Path, name: &str) -> Value {
    let path = data_dir.join(format!("{name}.json"));
    match fs::read_to_string(&path)
        .map_err(anyhow::Error::from)
        .and_then(|s| serde_json::from_str(&s).map_err(Into::into))
    {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!("{name}.json read failed ({err}), writing default");
            let default = default_data_file(name);
            let write = fs::create_dir_all(data_dir)
                .map_err(anyhow::Error::from)
                .and_then(|_| {
                    let text = serde_json::to_string_pretty(&default)?;
                    fs::write(&path, text).map_err(Into::into)
                });
            if let Err(err) = write {
                tracing::error!("failed to write default {name}.json: {err}");
            }
            default
        }
    }
}

fn default_data_file(name: &str) -> Value {
    match name {
        "manifest" => json!({
            "name": "VEGA",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {}
        }),
        "modules" => json!({ "modules": [] }),
        "soundscapes" => json!({
            "soundscapes": vega_core::SoundscapeId::ALL
                .iter()
                .map(|id| json!({ "id": id.as_str(), "track": vega_core::track_url(*id) }))
                .collect::<Vec<_>>()
        }),
        "whitepaper" => json!({ "title": "VEGA Whitepaper", "sections": [] }),
        "infinity" => json!({ "phases": [3, 5, 8], "iteration": 0 }),
        _ => json!({}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_writes_default_on_missing_file() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        assert!(!store.path().exists());

        let config = store.load();
        assert_eq!(config["site"]["title"], "Vega Foundation");
        assert!(store.path().exists());

        // second load reads the persisted file
        let again = store.load();
        assert_eq!(again["site"]["theme"], "chrome-glass");
    }

    #[test]
    fn merge_replaces_only_named_sections() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        store.load();

        let mut patch = Map::new();
        patch.insert("site".into(), json!({ "title": "Renamed" }));
        let merged = store.merge(patch).unwrap();

        assert_eq!(merged["site"]["title"], "Renamed");
        // shallow merge: the whole section was replaced
        assert!(merged["site"].get("theme").is_none());
        // untouched sections survive
        assert_eq!(merged["soundscapes"]["defaultEngine"], "stellar");

        let reread = store.load();
        assert_eq!(reread["site"]["title"], "Renamed");
    }

    #[test]
    fn data_file_generates_defaults() {
        let dir = tempdir().unwrap();
        let sound = data_file(dir.path(), "soundscapes");
        assert_eq!(sound["soundscapes"].as_array().unwrap().len(), 6);
        assert!(dir.path().join("soundscapes.json").exists());

        let infinity = data_file(dir.path(), "infinity");
        assert_eq!(infinity["phases"], json!([3, 5, 8]));
    }

    #[test]
    fn data_file_prefers_existing_content() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("modules.json"), r#"{"modules":[{"id":"m1"}]}"#).unwrap();
        let modules = data_file(dir.path(), "modules");
        assert_eq!(modules["modules"][0]["id"], "m1");
    }
}
