//! 3D view of cube states using kiss3d.

use kiss3d::prelude::*;

use cubefix::cube::Color as StickerColor;
use cubefix::geometry::STICKER_PLACEMENTS;
use cubefix::CubeState;

/// Display color for a sticker.
fn sticker_color(color: StickerColor) -> Color {
    match color {
        StickerColor::White => Color::new(0.95, 0.95, 0.95, 1.0),
        StickerColor::Red => Color::new(0.85, 0.1, 0.1, 1.0),
        StickerColor::Green => Color::new(0.1, 0.7, 0.2, 1.0),
        StickerColor::Yellow => Color::new(1.0, 0.85, 0.1, 1.0),
        StickerColor::Orange => Color::new(1.0, 0.5, 0.0, 1.0),
        StickerColor::Blue => Color::new(0.1, 0.3, 0.9, 1.0),
        StickerColor::Unknown => Color::new(1.0, 0.2, 1.0, 1.0), // magenta
    }
}

/// Adds a dark core and one flat tile per sticker.
///
/// Cubie coordinates in -1..=1 map directly to world units, with Y up and
/// the Green face towards +Z.
fn build_scene(scene: &mut SceneNode3d, state: &CubeState) -> Vec<SceneNode3d> {
    /// Edge length of a sticker tile.
    const TILE_SIZE: f32 = 0.85;
    /// Thickness of a tile along its normal.
    const TILE_DEPTH: f32 = 0.05;
    /// Edge length of the core behind the tiles.
    const CORE_SIZE: f32 = 2.95;

    let mut nodes = Vec::new();
    nodes.push(
        scene
            .add_cube(CORE_SIZE, CORE_SIZE, CORE_SIZE)
            .set_color(Color::new(0.08, 0.08, 0.08, 1.0)),
    );

    for (placement, &color) in STICKER_PLACEMENTS.iter().zip(state.stickers()) {
        let (cx, cy, cz) = placement.cubie;
        let (nx, ny, nz) = placement.normal;
        let extent = |axis: i32| if axis != 0 { TILE_DEPTH } else { TILE_SIZE };
        let position = Vec3::new(cx as f32, cy as f32, cz as f32)
            + Vec3::new(nx as f32, ny as f32, nz as f32) * (CORE_SIZE / 2.0 - 1.0 + TILE_DEPTH);

        let node = scene
            .add_cube(extent(nx), extent(ny), extent(nz))
            .set_color(sticker_color(color))
            .set_position(position);
        nodes.push(node);
    }

    nodes
}

/// Shows labelled states in an interactive 3D viewer.
pub fn display(states: Vec<(String, CubeState)>) {
    pollster::block_on(display_async(states));
}

async fn display_async(states: Vec<(String, CubeState)>) {
    if states.is_empty() {
        println!("No states to display");
        return;
    }

    let num_states = states.len();
    let mut current_index = 0;
    let title = |index: usize| {
        format!(
            "{} ({}/{}) - [Left/Right] switch state",
            states[index].0,
            index + 1,
            num_states
        )
    };

    let mut window = Window::new(&title(current_index)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(8.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut nodes = build_scene(&mut scene, &states[current_index].1);
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Right => {
                            current_index = (current_index + 1) % num_states;
                            needs_rebuild = true;
                        }
                        Key::Left => {
                            current_index = current_index.checked_sub(1).unwrap_or(num_states - 1);
                            needs_rebuild = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        if needs_rebuild {
            for mut node in nodes.drain(..) {
                node.remove();
            }
            nodes = build_scene(&mut scene, &states[current_index].1);
            window.set_title(&title(current_index));
            needs_rebuild = false;
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
