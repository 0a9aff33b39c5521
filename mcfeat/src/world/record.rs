//! A voxel access wrapper that records every write going through it.

use glam::IVec3;
use indexmap::IndexMap;

use crate::chunk::Chunk;

use super::VoxelAccess;


/// A single recorded call to [`VoxelAccess::set_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockWrite {
    pub pos: IVec3,
    pub id: u8,
    pub metadata: u8,
    pub notify: bool,
    /// Block id and metadata that were present before the write.
    pub prev: (u8, u8),
}

/// Wraps another voxel access and keeps the ordered log of every write, along with the
/// final state of each written position in the order they were first touched.
pub struct RecordingWorld<W> {
    inner: W,
    writes: Vec<BlockWrite>,
    diff: IndexMap<IVec3, (u8, u8)>,
}

impl<W: VoxelAccess> RecordingWorld<W> {

    pub fn new(inner: W) -> Self {
        Self {
            inner,
            writes: Vec::new(),
            diff: IndexMap::new(),
        }
    }

    /// All writes, in the order they were issued.
    #[inline]
    pub fn writes(&self) -> &[BlockWrite] {
        &self.writes
    }

    /// Final block of every written position, in first write order.
    #[inline]
    pub fn diff(&self) -> &IndexMap<IVec3, (u8, u8)> {
        &self.diff
    }

    /// Forget all recorded writes, keeping the world as is.
    pub fn clear(&mut self) {
        self.writes.clear();
        self.diff.clear();
    }

    #[inline]
    pub fn inner(&self) -> &W {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }

}

impl<W: VoxelAccess> VoxelAccess for RecordingWorld<W> {

    #[inline]
    fn get_block(&self, pos: IVec3) -> (u8, u8) {
        self.inner.get_block(pos)
    }

    fn set_block(&mut self, pos: IVec3, id: u8, metadata: u8, notify: bool) -> bool {
        let prev = self.inner.get_block(pos);
        self.writes.push(BlockWrite { pos, id, metadata, notify, prev });
        let written = self.inner.set_block(pos, id, metadata, notify);
        if written {
            self.diff.insert(pos, self.inner.get_block(pos));
        }
        written
    }

    #[inline]
    fn get_chunk(&self, cx: i32, cz: i32) -> Option<&Chunk> {
        self.inner.get_chunk(cx, cz)
    }

    #[inline]
    fn set_chunk(&mut self, cx: i32, cz: i32, chunk: Box<Chunk>) {
        self.inner.set_chunk(cx, cz, chunk);
    }

    #[inline]
    fn get_seed(&self) -> i64 {
        self.inner.get_seed()
    }

    #[inline]
    fn get_height(&self, x: i32, z: i32) -> i32 {
        self.inner.get_height(x, z)
    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::world::ChunkedWorld;
    use crate::geom::PosExt;
    use crate::block;

    #[test]
    fn records_in_order() {

        let mut world = RecordingWorld::new(ChunkedWorld::new(0));
        let a = IVec3::new(0, 10, 0);
        let b = IVec3::new(5, 10, 0);

        world.place_block(a, block::DIRT, 0);
        world.place_block(b, block::STONE, 0);
        world.place_block(a, block::GRASS, 0);
        world.place_block(a.down(1), block::GRASS, 0);

        assert_eq!(world.writes().len(), 4);
        assert_eq!(world.writes()[2].prev, (block::DIRT, 0));
        assert_eq!(world.diff().len(), 3);
        assert_eq!(world.diff().get_index(0), Some((&a, &(block::GRASS, 0))));
        assert_eq!(world.diff().get_index(1), Some((&b, &(block::STONE, 0))));

    }

    #[test]
    fn skips_out_of_height() {
        let mut world = RecordingWorld::new(ChunkedWorld::new(0));
        assert!(!world.place_block(IVec3::new(0, 300, 0), block::DIRT, 0));
        assert!(world.writes().is_empty());
    }

}
