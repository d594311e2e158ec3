use crate::coords::Vec2;

/// Three points of one output triangle.
pub type Triangle = [Vec2; 3];

/// Fan-triangulates a simple convex polygon from its first vertex.
///
/// - fewer than 3 vertices: empty
/// - exactly 3: the input triangle
/// - `n > 3`: `n - 2` triangles `(v0, v[i], v[i + 1])` for `i` in `1..=n - 2`
///
/// Concave or self-intersecting input produces a visually wrong but valid
/// triangle list.
pub fn triangulate_convex(vertices: &[Vec2]) -> Vec<Triangle> {
    let Some((&first, rest)) = vertices.split_first() else {
        return Vec::new();
    };
    if vertices.len() < 3 {
        return Vec::new();
    }

    rest.windows(2).map(|pair| [first, pair[0], pair[1]]).collect()
}

/// Unsigned polygon area by the shoelace formula.
pub fn polygon_area(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    twice.abs() / 2.0
}
