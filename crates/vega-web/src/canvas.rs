//! 2D canvas effect renderers, one routine per draw kind. Each routine
//! is a pure function of the context, viewport, palette, opacity and
//! the animation clock; only the starfield carries state (its particle
//! field). Canvas calls that cannot fail usefully are discarded.

use std::f64::consts::{PI, TAU};
use vega_core::{effect_config, EffectKind, ParticleField, VisualEffectId};
use web_sys as web;

/// "#rrggbb" + alpha byte, the canvas-friendly rgba hex form.
pub fn with_alpha(color: &str, alpha: f32) -> String {
    let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    format!("{color}{a:02x}")
}

fn pick<'a>(colors: &'a [&'a str], i: usize) -> &'a str {
    if colors.is_empty() {
        "#ffffff"
    } else {
        colors[i % colors.len()]
    }
}

pub fn draw_effect(
    ctx: &web::CanvasRenderingContext2d,
    id: VisualEffectId,
    opacity: f32,
    time: f32,
    w: f64,
    h: f64,
    stars: &mut ParticleField,
) {
    let cfg = effect_config(id);
    match cfg.kind {
        EffectKind::IceCrystals => draw_ice_crystals(ctx, cfg.colors, opacity, time, w, h),
        EffectKind::AuroraWaves => draw_aurora_waves(ctx, cfg.colors, opacity, time, w, h),
        EffectKind::CosmicGlow => draw_cosmic_glow(ctx, cfg.colors, opacity, time, w, h),
        EffectKind::FogMist => draw_fog_mist(ctx, cfg.colors, opacity, time, w, h),
        EffectKind::StarfieldNebula => {
            draw_starfield_nebula(ctx, cfg.colors, opacity, time, w, h, stars)
        }
        EffectKind::RainbowPrismatic => draw_rainbow_prismatic(ctx, cfg.colors, opacity, time, w, h),
    }
}

/// Rotating hexagonal crystals with a radial shimmer and spokes.
fn draw_ice_crystals(
    ctx: &web::CanvasRenderingContext2d,
    colors: &[&str],
    opacity: f32,
    time: f32,
    w: f64,
    h: f64,
) {
    let t = time as f64;
    for i in 0..12 {
        let fi = i as f64;
        let cx = w * (0.5 + 0.4 * (t * 0.1 + fi * 1.7).sin());
        let cy = h * (0.5 + 0.4 * (t * 0.13 + fi * 2.3).cos());
        let radius = 30.0 + 20.0 * (t * 0.5 + fi).sin().abs();
        let color = pick(colors, i);

        if let Ok(gradient) = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius) {
            let _ = gradient.add_color_stop(0.0, &with_alpha(color, opacity));
            let _ = gradient.add_color_stop(1.0, &with_alpha(color, 0.0));
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, radius, 0.0, TAU);
            ctx.fill();
        }

        // six spokes, slowly rotating
        ctx.set_stroke_style_str(&with_alpha(color, opacity * 0.8));
        ctx.set_line_width(1.5);
        let spin = t * 0.2 + fi;
        for k in 0..6 {
            let angle = spin + k as f64 * PI / 3.0;
            ctx.begin_path();
            ctx.move_to(cx, cy);
            ctx.line_to(cx + angle.cos() * radius, cy + angle.sin() * radius);
            ctx.stroke();
        }
    }
}

/// Layered sine-sum ribbons drifting across the viewport.
fn draw_aurora_waves(
    ctx: &web::CanvasRenderingContext2d,
    colors: &[&str],
    opacity: f32,
    time: f32,
    w: f64,
    h: f64,
) {
    let t = time as f64;
    for layer in 0..4 {
        let fl = layer as f64;
        let base_y = h * (0.25 + 0.15 * fl);
        let color = pick(colors, layer);

        ctx.begin_path();
        ctx.move_to(0.0, base_y);
        let mut x = 0.0;
        while x <= w {
            let y = base_y
                + 40.0 * (x * 0.01 + t * 0.5 + fl).sin()
                + 20.0 * (x * 0.02 - t * 0.3 + fl * 2.0).sin();
            ctx.line_to(x, y);
            x += 8.0;
        }
        ctx.line_to(w, h);
        ctx.line_to(0.0, h);
        ctx.close_path();

        let gradient = ctx.create_linear_gradient(0.0, base_y - 60.0, 0.0, h);
        let _ = gradient.add_color_stop(0.0, &with_alpha(color, opacity * 0.9));
        let _ = gradient.add_color_stop(1.0, &with_alpha(color, 0.0));
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill();
    }
}

/// Soft glows orbiting the center.
fn draw_cosmic_glow(
    ctx: &web::CanvasRenderingContext2d,
    colors: &[&str],
    opacity: f32,
    time: f32,
    w: f64,
    h: f64,
) {
    let t = time as f64;
    let (cx, cy) = (w / 2.0, h / 2.0);
    for i in 0..8 {
        let fi = i as f64;
        let angle = t * 0.3 + fi * TAU / 8.0;
        let orbit = w.min(h) * (0.15 + 0.1 * (t * 0.4 + fi).sin());
        let gx = cx + angle.cos() * orbit;
        let gy = cy + angle.sin() * orbit;
        let radius = 60.0 + 30.0 * (t + fi * 0.7).sin().abs();
        let color = pick(colors, i);

        if let Ok(gradient) = ctx.create_radial_gradient(gx, gy, 0.0, gx, gy, radius) {
            let _ = gradient.add_color_stop(0.0, &with_alpha(color, opacity));
            let _ = gradient.add_color_stop(0.6, &with_alpha(color, opacity * 0.3));
            let _ = gradient.add_color_stop(1.0, &with_alpha(color, 0.0));
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.begin_path();
            let _ = ctx.arc(gx, gy, radius, 0.0, TAU);
            ctx.fill();
        }
    }
}

/// Slow horizontal fog banks built from quadratic curves.
fn draw_fog_mist(
    ctx: &web::CanvasRenderingContext2d,
    colors: &[&str],
    opacity: f32,
    time: f32,
    w: f64,
    h: f64,
) {
    let t = time as f64;
    for i in 0..5 {
        let fi = i as f64;
        let y = h * (0.2 + 0.17 * fi) + 20.0 * (t * 0.2 + fi).sin();
        let drift = (t * 10.0 + fi * 120.0) % (w + 400.0) - 200.0;
        let color = pick(colors, i);

        ctx.set_fill_style_str(&with_alpha(color, opacity * 0.7));
        ctx.begin_path();
        ctx.move_to(drift - 200.0, y);
        ctx.quadratic_curve_to(drift, y - 50.0, drift + 200.0, y);
        ctx.quadratic_curve_to(drift + 400.0, y + 50.0, drift + 600.0, y);
        ctx.line_to(drift + 600.0, y + 80.0);
        ctx.line_to(drift - 200.0, y + 80.0);
        ctx.close_path();
        ctx.fill();
    }
}

/// Particle starfield plus a few drifting nebula glows.
fn draw_starfield_nebula(
    ctx: &web::CanvasRenderingContext2d,
    colors: &[&str],
    opacity: f32,
    time: f32,
    w: f64,
    h: f64,
    stars: &mut ParticleField,
) {
    let t = time as f64;
    stars.resize(w as f32, h as f32);
    stars.step(time);

    for (i, p) in stars.particles().iter().enumerate() {
        let twinkle = 0.5 + 0.5 * ((time + p.phase) as f64).sin();
        let color = pick(colors, i);
        ctx.set_fill_style_str(&with_alpha(color, p.opacity * opacity * twinkle as f32));
        ctx.begin_path();
        let _ = ctx.arc(p.x as f64, p.y as f64, p.size as f64, 0.0, TAU);
        ctx.fill();
    }

    for i in 0..3 {
        let fi = i as f64;
        let nx = w * (0.3 + 0.2 * fi + 0.05 * (t * 0.1 + fi).sin());
        let ny = h * (0.3 + 0.15 * fi + 0.05 * (t * 0.08 + fi).cos());
        let radius = w.min(h) * 0.25;
        let color = pick(colors, i + 1);
        if let Ok(gradient) = ctx.create_radial_gradient(nx, ny, 0.0, nx, ny, radius) {
            let _ = gradient.add_color_stop(0.0, &with_alpha(color, opacity * 0.4));
            let _ = gradient.add_color_stop(1.0, &with_alpha(color, 0.0));
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.begin_path();
            let _ = ctx.arc(nx, ny, radius, 0.0, TAU);
            ctx.fill();
        }
    }
}

/// Rotating concentric arc rings with a pulsing core.
fn draw_rainbow_prismatic(
    ctx: &web::CanvasRenderingContext2d,
    colors: &[&str],
    opacity: f32,
    time: f32,
    w: f64,
    h: f64,
) {
    let t = time as f64;
    let (cx, cy) = (w / 2.0, h / 2.0);
    for (i, color) in colors.iter().enumerate() {
        let fi = i as f64;
        let radius = 50.0 + fi * 45.0;
        let start = t * (0.3 + fi * 0.1);
        ctx.set_stroke_style_str(&with_alpha(color, opacity));
        ctx.set_line_width(3.0);
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, radius, start, start + PI * 1.2);
        ctx.stroke();
    }

    let pulse = 20.0 + 10.0 * (t * 2.0).sin().abs();
    let core = pick(colors, ((t * 0.5) as usize) % colors.len().max(1));
    if let Ok(gradient) = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, pulse) {
        let _ = gradient.add_color_stop(0.0, &with_alpha(core, opacity));
        let _ = gradient.add_color_stop(1.0, &with_alpha(core, 0.0));
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, pulse, 0.0, TAU);
        ctx.fill();
    }
}
