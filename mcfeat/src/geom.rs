//! Block position helpers and voxel line walking.
//!
//! Positions are plain [`IVec3`] values, every helper returns a new position.

use glam::IVec3;

use crate::util::Face;


/// Directional offset helpers for block positions.
pub trait PosExt: Copy {

    fn up(self, n: i32) -> Self;

    fn down(self, n: i32) -> Self;

    /// Toward negative Z.
    fn north(self, n: i32) -> Self;

    /// Toward positive Z.
    fn south(self, n: i32) -> Self;

    /// Toward negative X.
    fn west(self, n: i32) -> Self;

    /// Toward positive X.
    fn east(self, n: i32) -> Self;

    fn offset(self, face: Face, n: i32) -> Self;

}

impl PosExt for IVec3 {

    #[inline]
    fn up(self, n: i32) -> Self {
        IVec3::new(self.x, self.y + n, self.z)
    }

    #[inline]
    fn down(self, n: i32) -> Self {
        IVec3::new(self.x, self.y - n, self.z)
    }

    #[inline]
    fn north(self, n: i32) -> Self {
        IVec3::new(self.x, self.y, self.z - n)
    }

    #[inline]
    fn south(self, n: i32) -> Self {
        IVec3::new(self.x, self.y, self.z + n)
    }

    #[inline]
    fn west(self, n: i32) -> Self {
        IVec3::new(self.x - n, self.y, self.z)
    }

    #[inline]
    fn east(self, n: i32) -> Self {
        IVec3::new(self.x + n, self.y, self.z)
    }

    #[inline]
    fn offset(self, face: Face, n: i32) -> Self {
        self + face.delta() * n
    }

}


/// Iterator over every block of a straight line between two points, both included. The
/// walk advances one block per step along the axis of greatest delta, the two other
/// coordinates are interpolated with single-precision ratios.
#[derive(Debug, Default)]
pub struct BlockLine {
    from: IVec3,
    ratio: [f32; 3],
    steps: i32,
    step: i32,
}

impl BlockLine {

    pub fn new(from: IVec3, to: IVec3) -> Self {

        let delta = to - from;
        let abs = delta.abs();

        // PARITY: Ties prefer Y over X and only pick Z when strictly greatest.
        let steps = if abs.z > abs.x && abs.z > abs.y {
            abs.z
        } else if abs.y > abs.x {
            abs.y
        } else {
            abs.x
        };

        if steps == 0 {
            return Self { step: 1, ..Self::default() };
        }

        Self {
            from,
            ratio: [
                delta.x as f32 / steps as f32,
                delta.y as f32 / steps as f32,
                delta.z as f32 / steps as f32,
            ],
            steps,
            step: 0,
        }

    }

    /// Number of steps of the walk, this is the index of the last block.
    #[inline]
    pub fn steps(&self) -> i32 {
        self.steps
    }

}

impl Iterator for BlockLine {

    type Item = IVec3;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step > self.steps {
            None
        } else {
            let t = self.step as f32;
            let coord = |start: i32, ratio: f32| {
                (start as f64 + 0.5 + (t * ratio) as f64).floor() as i32
            };
            let pos = IVec3::new(
                coord(self.from.x, self.ratio[0]),
                coord(self.from.y, self.ratio[1]),
                coord(self.from.z, self.ratio[2]),
            );
            self.step += 1;
            Some(pos)
        }
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets() {
        let pos = IVec3::new(1, 64, -3);
        assert_eq!(pos.up(2), IVec3::new(1, 66, -3));
        assert_eq!(pos.down(1), IVec3::new(1, 63, -3));
        assert_eq!(pos.north(1), IVec3::new(1, 64, -4));
        assert_eq!(pos.south(1), IVec3::new(1, 64, -2));
        assert_eq!(pos.west(1), IVec3::new(0, 64, -3));
        assert_eq!(pos.east(1), IVec3::new(2, 64, -3));
        assert_eq!(pos.offset(Face::PosY, 3), pos.up(3));
        assert_eq!(pos, IVec3::new(1, 64, -3));
    }

    #[test]
    fn line_degenerate() {
        assert_eq!(BlockLine::new(IVec3::ONE, IVec3::ONE).count(), 0);
    }

    #[test]
    fn line_vertical() {
        let from = IVec3::new(4, 10, 4);
        let line: Vec<IVec3> = BlockLine::new(from, from.up(5)).collect();
        assert_eq!(line.len(), 6);
        assert_eq!(line[0], from);
        assert_eq!(line[5], from.up(5));
    }

    #[test]
    fn line_diagonal_ends() {
        let from = IVec3::new(0, 0, 0);
        let to = IVec3::new(4, 2, -3);
        let line: Vec<IVec3> = BlockLine::new(from, to).collect();
        assert_eq!(line.len(), 5);
        assert_eq!(line[0], from);
        assert_eq!(*line.last().unwrap(), to);
        for pair in line.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, 1);
        }
    }

}
