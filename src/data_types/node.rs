use super::datum::DatumRef;
use glam::DVec2;
use gpui::Hsla;

/// A circle produced by the layout, in chart coordinates (margins excluded).
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedNode<D> {
    pub id: String,
    /// Ancestor ids, root first, ending with this node's id.
    pub path: Vec<String>,
    pub value: f64,
    pub percentage: f64,
    pub formatted_value: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Hsla,
    pub depth: usize,
    /// Distance to the deepest descendant, 0 for leaves.
    pub height: usize,
    pub data: DatumRef<D>,
}

impl<D> ComputedNode<D> {
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Boundary inclusive circle membership.
    pub fn contains(&self, point: DVec2) -> bool {
        self.center().distance(point) <= self.radius
    }

    pub fn parent_id(&self) -> Option<&str> {
        let len = self.path.len();
        if len < 2 {
            return None;
        }
        self.path.get(len - 2).map(String::as_str)
    }
}
