/// Width/height pair of a rectangular grid, also used as an (x, y) position
/// within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub fn product(self) -> i32 {
        self.0 * self.1
    }

    pub fn contains(self, pos: Dims) -> bool {
        0 <= pos.0 && pos.0 < self.0 && 0 <= pos.1 && pos.1 < self.1
    }
}
