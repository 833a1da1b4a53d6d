//! Pick throughput over merged building meshes of increasing size.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use ifc_hover::camera::{Camera, CanvasRect, ViewportPoint};
use ifc_hover::options::CameraOptions;
use ifc_hover::picking::bvh::{BoundsTree, DEFAULT_LEAF_SIZE};
use ifc_hover::picking::Picker;
use ifc_hover::scene::{LoadedModel, Mesh, MeshBuilder, ModelId};

/// `side * side` boxes on a floor grid, one entity per box.
fn box_field(side: u32) -> Mesh {
    let mut builder = MeshBuilder::new();
    for i in 0..side {
        for j in 0..side {
            let min = Vec3::new(i as f32 * 1.5, 0.0, j as f32 * 1.5);
            builder.push_box(min, min + Vec3::new(1.0, 3.0, 1.0), i * side + j);
        }
    }
    builder.build().unwrap_or_else(|e| panic!("bench mesh: {e}"))
}

fn top_down_camera(center: Vec3) -> Camera {
    let options = CameraOptions {
        eye: (center + Vec3::Y * 80.0).to_array(),
        target: center.to_array(),
        up: [0.0, 0.0, 1.0],
        ..CameraOptions::default()
    };
    Camera::from_options(&options, 16.0 / 9.0)
}

fn build_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_build");
    for side in [16u32, 64] {
        let mesh = box_field(side);
        let name = format!("{}_triangles", mesh.triangle_count());
        let _ = group.bench_function(name, |b| {
            b.iter(|| black_box(BoundsTree::build(&mesh, DEFAULT_LEAF_SIZE)));
        });
    }
    group.finish();
}

fn pick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_at");
    let canvas = CanvasRect::from_size(1920.0, 1080.0);
    let picker: Picker = Picker::default();

    for side in [16u32, 64] {
        let model =
            LoadedModel::new(ModelId(0), box_field(side), DEFAULT_LEAF_SIZE);
        let camera = top_down_camera(model.bounds().center());
        let candidates = [&model];
        let points: Vec<ViewportPoint> = (0..32)
            .map(|i| ViewportPoint::new(i as f32 * 60.0, 540.0))
            .collect();

        let _ = group.bench_function(format!("{side}x{side}_boxes"), |b| {
            b.iter(|| {
                for &point in &points {
                    let _ = black_box(picker.pick_at(
                        point,
                        &canvas,
                        &camera,
                        &candidates,
                    ));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, build_benchmark, pick_benchmark);
criterion_main!(benches);
