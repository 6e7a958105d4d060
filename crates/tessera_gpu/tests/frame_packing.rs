use tessera_gpu::upload::{DrawBinding, PackedFrame};
use tessera_gpu::ImageHandle;
use tessera_paint::{Canvas, Color, ImageId};

fn clipped_scene() -> tessera_paint::Frame {
    let image = ImageHandle {
        id: ImageId(9),
        width: 4,
        height: 4,
    };

    let mut canvas = Canvas::new(64, 64);
    canvas.clear(Color::BLACK);
    canvas.draw_image(&image, 0.0, 0.0);
    canvas.set_fill_color(Color::RED);
    canvas.fill_rect(0.0, 0.0, 8.0, 8.0);

    canvas.save();
    canvas.begin_path();
    canvas.rect(10.0, 10.0, 20.0, 20.0);
    canvas.clip();
    canvas.fill_rect(0.0, 0.0, 64.0, 64.0);
    canvas.restore();

    canvas.take_frame()
}

#[test]
fn test_clip_writes_are_packed_first() {
    let packed = PackedFrame::pack(&clipped_scene());
    assert!(!packed.is_empty());
    assert_eq!(packed.draws[0].binding, DrawBinding::Clip);
    assert_eq!(packed.draws[0].clip_depth, 1);
    assert_eq!(
        packed.draws.last().map(|d| d.binding),
        Some(DrawBinding::Image(ImageId(9)))
    );
}

#[test]
fn test_solid_draws_keep_their_depths() {
    let packed = PackedFrame::pack(&clipped_scene());
    let depths: Vec<u32> = packed
        .draws
        .iter()
        .filter(|d| d.binding == DrawBinding::White)
        .map(|d| d.clip_depth)
        .collect();
    assert_eq!(depths, vec![0, 1]);
}

#[test]
fn test_ranges_cover_all_indices() {
    let packed = PackedFrame::pack(&clipped_scene());
    let mut next = 0;
    for draw in &packed.draws {
        assert_eq!(draw.first_index, next);
        assert_eq!(draw.index_count % 3, 0);
        next += draw.index_count;
    }
    assert_eq!(next as usize, packed.indices.len());

    for draw in &packed.draws {
        let range = draw.first_index as usize..(draw.first_index + draw.index_count) as usize;
        for &i in &packed.indices[range] {
            assert!((draw.base_vertex as usize + i as usize) < packed.vertices.len());
        }
    }
}

/// Replays a packed frame's stencil ops at one pixel center
///
/// Clip draws increment where the stencil equals their reference; color
/// draws pass where their reference is at most the stencil value.
fn covered_at(packed: &PackedFrame, x: f32, y: f32) -> Vec<bool> {
    let p = [x + 0.5, y + 0.5];
    let mut stencil: u32 = 0;
    let mut passes = Vec::new();

    for draw in &packed.draws {
        let range = draw.first_index as usize..(draw.first_index + draw.index_count) as usize;
        for tri in packed.indices[range].chunks_exact(3) {
            let corner = |i: u32| packed.vertices[draw.base_vertex as usize + i as usize].position;
            if !inside(p, corner(tri[0]), corner(tri[1]), corner(tri[2])) {
                continue;
            }
            match draw.binding {
                DrawBinding::Clip => {
                    if stencil == draw.stencil_reference() {
                        stencil = (stencil + 1).min(255);
                    }
                }
                DrawBinding::White | DrawBinding::Image(_) => {
                    passes.push(draw.stencil_reference() <= stencil);
                }
            }
        }
    }
    passes
}

fn inside(p: [f32; 2], a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> bool {
    let edge = |u: [f32; 2], v: [f32; 2]| {
        (v[0] - u[0]) * (p[1] - u[1]) - (v[1] - u[1]) * (p[0] - u[0])
    };
    let (d0, d1, d2) = (edge(a, b), edge(b, c), edge(c, a));
    let negative = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let positive = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(negative && positive)
}

#[test]
fn test_nested_clip_only_shrinks_visible_region() {
    let mut canvas = Canvas::new(100, 100);
    canvas.clear(Color::BLACK);
    canvas.begin_path();
    canvas.rect(0.0, 0.0, 50.0, 50.0);
    canvas.clip();
    canvas.begin_path();
    canvas.rect(40.0, 40.0, 50.0, 50.0);
    canvas.clip();
    canvas.set_fill_color(Color::RED);
    canvas.fill_rect(0.0, 0.0, 100.0, 100.0);
    let packed = PackedFrame::pack(&canvas.take_frame());

    // inside both clips
    assert!(covered_at(&packed, 45.0, 45.0).iter().any(|&p| p));
    // inside the second clip only
    assert!(covered_at(&packed, 80.0, 80.0).iter().all(|&p| !p));
    // inside the first clip only
    assert!(covered_at(&packed, 20.0, 20.0).iter().all(|&p| !p));
    assert!(covered_at(&packed, 95.0, 5.0).iter().all(|&p| !p));
}

#[test]
fn test_restored_clip_depth_sees_parent_region() {
    let mut canvas = Canvas::new(100, 100);
    canvas.clear(Color::BLACK);
    canvas.begin_path();
    canvas.rect(0.0, 0.0, 50.0, 50.0);
    canvas.clip();
    canvas.save();
    canvas.begin_path();
    canvas.rect(40.0, 40.0, 50.0, 50.0);
    canvas.clip();
    canvas.restore();
    canvas.set_fill_color(Color::RED);
    canvas.fill_rect(0.0, 0.0, 100.0, 100.0);
    let packed = PackedFrame::pack(&canvas.take_frame());

    assert!(covered_at(&packed, 20.0, 20.0).iter().any(|&p| p));
    assert!(covered_at(&packed, 45.0, 45.0).iter().any(|&p| p));
    assert!(covered_at(&packed, 80.0, 80.0).iter().all(|&p| !p));
}
