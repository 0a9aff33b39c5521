use glam::IVec3;


/// Represent a cube facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    NegY = 0,
    PosY = 1,
    NegZ = 2,
    PosZ = 3,
    NegX = 4,
    PosX = 5,
}

impl Face {

    /// Array containing all 6 faces.
    pub const ALL: [Self; 6] = [Self::NegY, Self::PosY, Self::NegZ, Self::PosZ, Self::NegX, Self::PosX];
    /// Array containing all 4 horizontal faces, in the order used when a generator draws
    /// a random direction with `next_bounded_int(4)`.
    pub const HORIZONTAL: [Self; 4] = [Self::NegZ, Self::PosZ, Self::NegX, Self::PosX];

    #[inline]
    pub fn is_y(self) -> bool {
        matches!(self, Face::NegY | Face::PosY)
    }

    /// Get the opposite face.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Face::NegY => Face::PosY,
            Face::PosY => Face::NegY,
            Face::NegZ => Face::PosZ,
            Face::PosZ => Face::NegZ,
            Face::NegX => Face::PosX,
            Face::PosX => Face::NegX,
        }
    }

    /// Get the delta vector for this face.
    #[inline]
    pub fn delta(self) -> IVec3 {
        match self {
            Face::NegY => IVec3::NEG_Y,
            Face::PosY => IVec3::Y,
            Face::NegZ => IVec3::NEG_Z,
            Face::PosZ => IVec3::Z,
            Face::NegX => IVec3::NEG_X,
            Face::PosX => IVec3::X,
        }
    }

    /// Vine metadata for a vine block placed on this side of its support, this is also
    /// the bit set by the vine scatter when the support is found on this side.
    #[inline]
    pub fn vine_meta(self) -> u8 {
        match self {
            Face::NegZ => 1,
            Face::PosX => 2,
            Face::PosZ => 4,
            Face::NegX => 8,
            Face::NegY |
            Face::PosY => 0,
        }
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn opposite_delta() {
        for face in Face::ALL {
            assert_eq!(face.delta() + face.opposite().delta(), IVec3::ZERO);
        }
    }

    #[test]
    fn horizontal_vine_bits() {
        let all = Face::HORIZONTAL.iter().fold(0, |acc, face| acc | face.vine_meta());
        assert_eq!(all, 0b1111);
        assert!(Face::HORIZONTAL.iter().all(|face| !face.is_y()));
    }

}
