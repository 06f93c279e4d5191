//! Build-script rendering.
//!
//! A [`BuildPlan`] is rendered as a SketchUp Ruby script: one group per board,
//! drawn as a rectangle on the XY plane and pushed up along Z, all inside a
//! single undoable operation that aborts on the first error.

use crate::template::BuildPlan;
use woodshop_core::{BoardPlacement, MarkerPlacement};

/// Format a length for Ruby, e.g. `19.mm`.
fn mm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}.mm", value)
    } else {
        format!("{}.mm", value)
    }
}

/// Quote a string as a double-quoted Ruby literal.
fn ruby_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => out.push_str("\\#"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn push_box(script: &mut String, name: &str, origin: [f64; 3], size: [f64; 3]) {
    let [x, y, z] = origin;
    let [dx, dy, dz] = size;
    script.push_str("  group = model.active_entities.add_group\n");
    script.push_str(&format!("  group.name = {}\n", ruby_str(name)));
    script.push_str("  pts = [\n");
    script.push_str(&format!("    [{}, {}, {}],\n", mm(x), mm(y), mm(z)));
    script.push_str(&format!("    [{}, {}, {}],\n", mm(x + dx), mm(y), mm(z)));
    script.push_str(&format!("    [{}, {}, {}],\n", mm(x + dx), mm(y + dy), mm(z)));
    script.push_str(&format!("    [{}, {}, {}]\n", mm(x), mm(y + dy), mm(z)));
    script.push_str("  ]\n");
    script.push_str("  face = group.entities.add_face(pts)\n");
    script.push_str("  face.reverse! if face.normal.z < 0\n");
    script.push_str(&format!("  face.pushpull({})\n", mm(dz)));
}

fn push_board(script: &mut String, board: &BoardPlacement) {
    script.push_str(&format!("  # Board: {} ({})\n", board.name, board.part));
    let o = board.origin;
    push_box(
        script,
        &board.name,
        [o.x, o.y, o.z],
        [board.size.dx, board.size.dy, board.size.dz],
    );
    if board.rotation_x_deg != 0.0 {
        script.push_str(&format!(
            "  group.transform!(Geom::Transformation.rotation([{}, {}, {}], X_AXIS, {}.degrees))\n",
            mm(o.x),
            mm(o.y),
            mm(o.z),
            board.rotation_x_deg
        ));
    }
    script.push_str("  group.material = wood\n");
    script.push('\n');
}

fn push_marker(script: &mut String, marker: &MarkerPlacement) {
    script.push_str(&format!("  # Marker: {} ({})\n", marker.name, marker.joint));
    let o = marker.origin;
    push_box(
        script,
        &marker.name,
        [o.x, o.y, o.z],
        [marker.size.dx, marker.size.dy, marker.size.dz],
    );
    let material = format!("Joint {}", marker.joint);
    script.push_str(&format!(
        "  mark = model.materials[{0}] || model.materials.add({0})\n",
        ruby_str(&material)
    ));
    script.push_str(&format!("  mark.color = {}\n", ruby_str(&marker.color)));
    script.push_str("  group.material = mark\n");
    script.push('\n');
}

/// Render a plan as a single undoable build script.
pub fn render_build_script(plan: &BuildPlan) -> String {
    let mut script = String::new();
    let operation = ruby_str(&plan.operation);

    script.push_str(&format!("# {}\n", plan.operation));
    script.push_str(&format!(
        "# {} boards, {} joint markers\n",
        plan.boards.len(),
        plan.markers.len()
    ));
    script.push_str("model = Sketchup.active_model\n");
    script.push_str(&format!("model.start_operation({}, true)\n", operation));
    script.push('\n');
    script.push_str("begin\n");
    script.push_str(&format!(
        "  wood = model.materials[{0}] || model.materials.add({0})\n\n",
        ruby_str(&plan.material)
    ));

    for board in &plan.boards {
        push_board(&mut script, board);
    }
    for marker in &plan.markers {
        push_marker(&mut script, marker);
    }

    script.push_str("  model.commit_operation\n");
    script.push_str(&format!(
        "  {}\n",
        ruby_str(&format!("Created {} successfully", plan.operation))
    ));
    script.push_str("rescue => e\n");
    script.push_str("  model.abort_operation\n");
    script.push_str("  raise e\n");
    script.push_str("end\n");
    script
}
