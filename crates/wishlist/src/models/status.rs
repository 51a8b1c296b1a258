use serde::Serialize;

/// Response body of a mark toggle.
#[derive(Debug, Serialize)]
pub struct MarkResponse {
    pub message: &'static str,
    pub marked: bool,
}

impl MarkResponse {
    pub fn new(marked: bool) -> Self {
        Self {
            message: "Item status updated",
            marked,
        }
    }
}
