/// Corner type classification from the segment test
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerType {
    Bright,
    Dark,
    None,
}

impl CornerType {
    pub fn is_corner(self) -> bool {
        !matches!(self, CornerType::None)
    }
}
