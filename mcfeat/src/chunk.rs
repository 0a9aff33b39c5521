//! A chunk storing block ids and metadata.

use glam::IVec3;

use crate::block::AIR;


/// Chunk size in both X and Z coordinates.
pub const CHUNK_WIDTH: usize = 16;
/// Chunk height.
pub const CHUNK_HEIGHT: usize = 256;
/// Internal chunk size, in number of elements per chunk.
const CHUNK_SIZE: usize = CHUNK_HEIGHT * CHUNK_WIDTH * CHUNK_WIDTH;


/// Calculate the index in the chunk's arrays for the given chunk-local position, the
/// layout is `xxxx zzzz yyyy yyyy`. Only firsts relevant bits are taken in each
/// coordinate component.
#[inline]
fn calc_index(pos: IVec3) -> usize {
    debug_assert!(pos.y >= 0 && pos.y < CHUNK_HEIGHT as i32);
    let x = pos.x as u32 & 0b1111;
    let z = pos.z as u32 & 0b1111;
    let y = pos.y as u32 & 0b11111111;
    ((x << 12) | (z << 8) | y) as usize
}

/// Return true if the given Y coordinate is inside the world height.
#[inline]
pub fn is_valid_y(y: i32) -> bool {
    y >= 0 && y < CHUNK_HEIGHT as i32
}

/// Calculate the chunk position corresponding to the given block position. This returns
/// no position if the Y coordinate is invalid.
#[inline]
pub fn calc_chunk_pos(pos: IVec3) -> Option<(i32, i32)> {
    if !is_valid_y(pos.y) {
        None
    } else {
        Some(calc_chunk_pos_unchecked(pos))
    }
}

/// Calculate the chunk position corresponding to the given block position. The Y
/// coordinate is ignored, so it may be invalid.
#[inline]
pub fn calc_chunk_pos_unchecked(pos: IVec3) -> (i32, i32) {
    (pos.x >> 4, pos.z >> 4)
}


/// Data structure storing every chunk-local data, chunks are a world subdivision of
/// 16x256x16 blocks.
pub struct Chunk {
    /// The numeric identifier of the block.
    block: ChunkByteArray,
    /// Four byte metadata for each block.
    metadata: ChunkNibbleArray,
}

impl Chunk {

    /// Create a new empty chunk, full of air blocks.
    pub fn new() -> Box<Self> {
        Box::new(Self {
            block: [AIR; CHUNK_SIZE],
            metadata: ChunkNibbleArray::new(0),
        })
    }

    /// Get block id at the given global position (rebased to chunk-local).
    /// Panics if Y component of the position is not between 0 and 256 (excluded).
    #[inline]
    pub fn block(&self, pos: IVec3) -> u8 {
        self.block[calc_index(pos)]
    }

    /// Get block id and metadata at the given global position (rebased to chunk-local).
    /// Panics if Y component of the position is not between 0 and 256 (excluded).
    #[inline]
    pub fn block_and_metadata(&self, pos: IVec3) -> (u8, u8) {
        let index = calc_index(pos);
        (self.block[index], self.metadata.get(index))
    }

    /// Set block id and metadata at the given global position (rebased to chunk-local).
    /// Panics if Y component of the position is not between 0 and 256 (excluded).
    #[inline]
    pub fn set_block_and_metadata(&mut self, pos: IVec3, block: u8, metadata: u8) {
        let index = calc_index(pos);
        self.block[index] = block;
        self.metadata.set(index, metadata & 0x0F);
    }

    /// Fill the given chunk area with given block id and metadata.
    /// Panics if Y component of the position is not between 0 and 256 (excluded).
    pub fn fill_block_and_metadata(&mut self,
        start: IVec3,
        size: IVec3,
        id: u8, metadata: u8
    ) {

        for x in start.x..start.x + size.x {
            for z in start.z..start.z + size.z {
                let mut index = calc_index(IVec3::new(x, start.y, z));
                for _ in start.y..start.y + size.y {

                    self.block[index] = id;
                    self.metadata.set(index, metadata);

                    // Increment Y component.
                    index += 1;

                }
            }
        }

    }

    /// Return the Y coordinate just above the highest non-air block of the column, 0 if
    /// the column is empty. Only the X and Z components of the position are used.
    pub fn height(&self, pos: IVec3) -> i32 {
        let base = calc_index(IVec3::new(pos.x, 0, pos.z));
        self.block[base..base + CHUNK_HEIGHT]
            .iter()
            .rposition(|&id| id != AIR)
            .map_or(0, |y| y as i32 + 1)
    }

}

/// Type alias for a chunk array that stores `u8 * CHUNK_SIZE` values.
type ChunkByteArray = [u8; CHUNK_SIZE];

/// Special arrays for chunks that stores `u4 * CHUNK_SIZE` values.
struct ChunkNibbleArray {
    inner: [u8; CHUNK_SIZE / 2]
}

impl ChunkNibbleArray {

    const fn new(init: u8) -> Self {
        debug_assert!(init <= 0x0F);
        let init = init << 4 | init;
        Self { inner: [init; CHUNK_SIZE / 2] }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        let slot = self.inner[index >> 1];
        if index & 1 == 0 {
            slot & 0x0F
        } else {
            (slot & 0xF0) >> 4
        }
    }

    #[inline]
    fn set(&mut self, index: usize, value: u8) {
        debug_assert!(value <= 0x0F);
        let slot = &mut self.inner[index >> 1];
        if index & 1 == 0 {
            *slot = (*slot & 0xF0) | value;
        } else {
            *slot = (*slot & 0x0F) | (value << 4);
        }
    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::block;

    #[test]
    fn block_and_metadata() {
        let mut chunk = Chunk::new();
        let pos = IVec3::new(-1, 255, 17);
        chunk.set_block_and_metadata(pos, block::LOG, 3);
        assert_eq!(chunk.block_and_metadata(pos), (block::LOG, 3));
        assert_eq!(chunk.block_and_metadata(IVec3::new(15, 255, 1)), (block::LOG, 3));
        assert_eq!(chunk.block(IVec3::new(15, 254, 1)), block::AIR);
    }

    #[test]
    fn height() {
        let mut chunk = Chunk::new();
        assert_eq!(chunk.height(IVec3::new(3, 0, 3)), 0);
        chunk.fill_block_and_metadata(IVec3::new(0, 0, 0), IVec3::new(16, 64, 16), block::STONE, 0);
        chunk.set_block_and_metadata(IVec3::new(3, 70, 3), block::LEAVES, 0);
        assert_eq!(chunk.height(IVec3::new(3, 0, 3)), 71);
        assert_eq!(chunk.height(IVec3::new(4, 0, 3)), 64);
    }

    #[test]
    fn chunk_pos() {
        assert_eq!(calc_chunk_pos(IVec3::new(-1, 10, 16)), Some((-1, 1)));
        assert_eq!(calc_chunk_pos(IVec3::new(0, 256, 0)), None);
        assert_eq!(calc_chunk_pos(IVec3::new(0, -1, 0)), None);
    }

}
