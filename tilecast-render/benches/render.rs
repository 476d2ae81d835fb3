#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};

use tilecast::content::{DemoTemplate, demo_world};
use tilecast::material::Palette;
use tilecast::math::ImageSize;
use tilecast_render::camera::Camera;
use tilecast_render::{ColumnRenderer, HierarchyRenderer, Renderer as _};

pub fn render_bench(c: &mut Criterion) {
    let world = demo_world(DemoTemplate::Nested, 0, Palette::textured_placeholder()).unwrap();
    let camera = Camera::new(ImageSize::new(320, 240), Camera::DEFAULT_FOV_DEGREES).unwrap();

    let mut g = c.benchmark_group("render");
    g.sample_size(20);
    g.bench_function("hierarchy 320×240", |b| {
        let renderer = HierarchyRenderer::new(camera);
        b.iter(|| renderer.render(&world));
    });
    g.bench_function("columns 320×240", |b| {
        let renderer = ColumnRenderer::new(camera);
        b.iter(|| renderer.render(&world));
    });
    g.finish();
}

criterion_group!(benches, render_bench);
criterion_main!(benches);
