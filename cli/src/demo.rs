use crate::commands::{CliError, DemoCmd};
use lyon_brace::svg::data_bounds;
use lyon_brace::{
    curly_brace, BracePatch, BraceParams, Canvas, CanvasOptions, Color, Pointing, StrokeStyle,
};
use std::io::Write;

const BRACES_PER_SIDE: usize = 4;

// Space around the braces when the view is fitted to them.
const FIT_MARGIN: f32 = 0.05;

// Samples of matplotlib's plasma color map at 0, 1/8, 2/8, ... 1.
const PLASMA: [Color; 9] = [
    Color::rgb(0x0d, 0x08, 0x87),
    Color::rgb(0x4c, 0x02, 0xa1),
    Color::rgb(0x7e, 0x03, 0xa8),
    Color::rgb(0xa9, 0x23, 0x95),
    Color::rgb(0xcc, 0x47, 0x78),
    Color::rgb(0xe5, 0x6b, 0x5d),
    Color::rgb(0xf8, 0x95, 0x40),
    Color::rgb(0xfd, 0xc3, 0x28),
    Color::rgb(0xf0, 0xf9, 0x21),
];

/// Looks up the plasma color map, `t` being clamped to `[0, 1]`.
pub fn plasma(t: f32) -> Color {
    let t = t.max(0.0).min(1.0) * (PLASMA.len() - 1) as f32;
    let idx = (t.floor() as usize).min(PLASMA.len() - 2);
    PLASMA[idx].lerp(PLASMA[idx + 1], t - idx as f32)
}

fn linspace(start: f32, end: f32, n: usize) -> impl Iterator<Item = f32> {
    let step = if n > 1 { (end - start) / (n - 1) as f32 } else { 0.0 };
    (0..n).map(move |i| start + step * i as f32)
}

/// Two rows of braces facing each other, getting narrower, flatter and
/// thicker toward the middle of the unit square.
pub fn demo_patches() -> Vec<BracePatch> {
    let mut patches = Vec::with_capacity(2 * BRACES_PER_SIDE);

    for (side, pointing) in [Pointing::Right, Pointing::Left].iter().enumerate() {
        let widths = linspace(0.1, 0.18, BRACES_PER_SIDE);
        let heights = linspace(0.95, 0.5, BRACES_PER_SIDE);
        let curliness = linspace(0.1, 0.5, BRACES_PER_SIDE);

        for (i, ((w, h), c)) in widths.zip(heights).zip(curliness).enumerate() {
            let offset = i as f32 * 0.1;
            let x = if side == 0 { offset } else { 1.0 - offset - w };

            let params = BraceParams::at(x, (1.0 - h) / 2.0)
                .with_size(w, h)
                .with_curliness(c)
                .with_pointing(*pointing);

            let style = StrokeStyle::DEFAULT
                .with_line_width(3.0 * i as f32 + 1.0)
                .with_color(plasma(side as f32 / 2.0 + i as f32 / 8.0));

            patches.push(curly_brace(&params, &style));
        }
    }

    patches
}

/// The demo braces on a square canvas. The view is the unit square unless
/// `fit` is set, in which case it wraps the braces with a small margin.
pub fn demo_canvas(size: f32, fit: bool) -> Canvas {
    let patches = demo_patches();

    let mut options = CanvasOptions::DEFAULT.with_size(size, size);
    if fit {
        if let Some(bounds) = data_bounds(&patches) {
            debug!("fitting the view to {:?}", bounds);
            options = options.with_view(bounds.inflate(FIT_MARGIN, FIT_MARGIN));
        }
    }

    let mut canvas = Canvas::new(options);
    for patch in patches {
        canvas.add_patch(patch);
    }

    canvas
}

pub fn demo(mut cmd: DemoCmd) -> Result<(), CliError> {
    let canvas = demo_canvas(cmd.size, cmd.fit);
    canvas.write_to(&mut cmd.output)?;
    cmd.output.flush()?;

    Ok(())
}

#[test]
fn plasma_samples() {
    assert_eq!(plasma(0.0), PLASMA[0]);
    assert_eq!(plasma(0.5), PLASMA[4]);
    assert_eq!(plasma(1.0), PLASMA[8]);
    assert_eq!(plasma(-1.0), PLASMA[0]);
    assert_eq!(plasma(0.125 * 3.0), PLASMA[3]);
}

#[test]
fn linspace_ends() {
    let values: Vec<f32> = linspace(0.1, 0.5, 4).collect();
    assert_eq!(values.len(), 4);
    assert_eq!(values[0], 0.1);
    assert!((values[3] - 0.5).abs() < 1e-6);
    assert_eq!(linspace(1.0, 2.0, 1).collect::<Vec<_>>(), vec![1.0]);
}

#[test]
fn demo_layout() {
    let canvas = demo_canvas(400.0, false);
    assert_eq!(canvas.options().view, CanvasOptions::DEFAULT.view);
    assert_eq!(canvas.len(), 2 * BRACES_PER_SIDE);

    for (n, patch) in canvas.patches().iter().enumerate() {
        let (side, i) = (n / BRACES_PER_SIDE, n % BRACES_PER_SIDE);
        let geometry = patch.geometry();

        // Vertically centered.
        let mid = (geometry.first().y + geometry.last().y) / 2.0;
        assert!((mid - 0.5).abs() < 1e-5);

        assert_eq!(patch.style().line_width, 3.0 * i as f32 + 1.0);
        assert_eq!(patch.edge_color(), PLASMA[side * 4 + i]);

        // The left side points right, with the apex on its right edge.
        let apex = geometry.apex();
        if side == 0 {
            assert!(apex.x > geometry.first().x);
            assert!((geometry.first().x - i as f32 * 0.1).abs() < 1e-5);
        } else {
            assert!(apex.x < geometry.first().x);
            assert!((geometry.first().x - (1.0 - i as f32 * 0.1)).abs() < 1e-5);
        }
    }

    let svg = canvas.to_svg_string().unwrap();
    assert_eq!(svg.matches("<path").count(), 8);
}

#[test]
fn fitted_view() {
    let canvas = demo_canvas(400.0, true);
    let view = canvas.options().view;

    // The outermost braces span the full unit width and 95% of its height.
    assert!((view.min.x + FIT_MARGIN).abs() < 1e-4);
    assert!((view.max.x - 1.0 - FIT_MARGIN).abs() < 1e-4);
    assert!((view.min.y - 0.025 + FIT_MARGIN).abs() < 1e-4);
    assert!((view.max.y - 0.975 - FIT_MARGIN).abs() < 1e-4);

    for patch in canvas.patches() {
        assert!(view.contains_box(&patch.bounding_box()));
    }
}
