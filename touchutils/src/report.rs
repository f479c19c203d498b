use touchutils_lib::GestureSnapshot;

/// Human-readable gesture lines for one frame, most specific first.
pub fn describe(snapshot: &GestureSnapshot) -> Vec<String> {
    let mut msgs = Vec::new();

    if let Some((a, b, c)) = snapshot.tapped_three() {
        msgs.push(format!(
            "tapped three at ({}, {}), ({}, {}), ({}, {})",
            a.x, a.y, b.x, b.y, c.x, c.y
        ));
    } else if let Some((a, b)) = snapshot.tapped_two() {
        msgs.push(format!("tapped two at ({}, {}), ({}, {})", a.x, a.y, b.x, b.y));
    } else if let Some(a) = snapshot.tapped_one() {
        msgs.push(format!("tapped one at ({}, {})", a.x, a.y));
    }

    match snapshot.touch_count {
        0 => {}
        1 => {
            if let Some((x, y)) = snapshot.first_touch {
                msgs.push(format!("touching one at ({x}, {y})"));
            }
        }
        2 => msgs.push("touching two".to_string()),
        3 => msgs.push("touching three".to_string()),
        n => msgs.push(format!("touching {n}")),
    }

    if let Some(pan) = snapshot.pan {
        let axis = if pan.is_horizontal() {
            "horizontal"
        } else {
            "vertical"
        };
        msgs.push(format!("{axis} pan, offset {}", pan.offset()));
    }
    if let Some(pinch) = snapshot.pinch {
        let direction = if pinch.is_inward() {
            "inward"
        } else if pinch.is_outward() {
            "outward"
        } else {
            "steady"
        };
        msgs.push(format!(
            "{direction} pinch around ({}, {}), scale {:.2}",
            pinch.center_x,
            pinch.center_y,
            pinch.scale()
        ));
    }

    msgs
}
