//! Voxel access used by feature generators, and an in-memory chunked implementation.

use std::collections::HashMap;

use glam::IVec3;

use tracing::trace;

use crate::chunk::{Chunk, calc_chunk_pos, calc_chunk_pos_unchecked, is_valid_y,
    CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::config;
use crate::block;


mod record;
pub use record::{RecordingWorld, BlockWrite};


/// Read and write access to a voxel world, this is what feature generators mutate.
///
/// Implementations must return air for positions outside of the world height, the
/// provided `place_*` methods never forward writes outside of `0..256`.
///
/// # Naming convention
///
/// Methods that don't alter the world are prefixed by `get_` or `is_`. Raw mutation is
/// done with [`VoxelAccess::set_block`], generators always go through the `place_`
/// methods that bound check the Y coordinate first.
pub trait VoxelAccess {

    /// Get the block id and metadata at the given position.
    fn get_block(&self, pos: IVec3) -> (u8, u8);

    /// Set the block id and metadata at the given position, returning true if the
    /// block has been written. Neighbors are notified of the change if requested.
    fn set_block(&mut self, pos: IVec3, id: u8, metadata: u8, notify: bool) -> bool;

    /// Get a chunk if it exists.
    fn get_chunk(&self, cx: i32, cz: i32) -> Option<&Chunk>;

    /// Insert or replace the chunk at the given chunk coordinates.
    fn set_chunk(&mut self, cx: i32, cz: i32, chunk: Box<Chunk>);

    /// Get the world seed.
    fn get_seed(&self) -> i64;

    /// Get the Y coordinate just above the highest non-air block of a column.
    fn get_height(&self, x: i32, z: i32) -> i32;

    #[inline]
    fn get_block_id(&self, pos: IVec3) -> u8 {
        self.get_block(pos).0
    }

    #[inline]
    fn is_block(&self, pos: IVec3, id: u8) -> bool {
        self.get_block_id(pos) == id
    }

    #[inline]
    fn is_air(&self, pos: IVec3) -> bool {
        self.get_block_id(pos) == block::AIR
    }

    /// Place a block without notification, writes outside of the world height are
    /// skipped and return false.
    #[inline]
    fn place_block(&mut self, pos: IVec3, id: u8, metadata: u8) -> bool {
        place(self, pos, id, metadata, false)
    }

    /// Place a block and notify its neighbors, writes outside of the world height are
    /// skipped and return false.
    #[inline]
    fn place_block_notify(&mut self, pos: IVec3, id: u8, metadata: u8) -> bool {
        place(self, pos, id, metadata, true)
    }

}

fn place<W: VoxelAccess + ?Sized>(world: &mut W, pos: IVec3, id: u8, metadata: u8, notify: bool) -> bool {
    if !is_valid_y(pos.y) {
        return false;
    }
    if config::trace_writes() {
        trace!("place {} ({id}:{metadata}) at {pos}", block::name(id));
    }
    world.set_block(pos, id, metadata, notify)
}


/// A sparse in-memory world made of boxed chunks.
///
/// Missing chunks read as a base layer profile (air by default), and are allocated
/// from that profile on the first write.
pub struct ChunkedWorld {
    /// Seed reported to generators.
    seed: i64,
    /// Block and metadata of the base profile, indexed by Y.
    base: Box<[(u8, u8); CHUNK_HEIGHT]>,
    /// Allocated chunks, mapped to their chunk coordinates.
    chunks: HashMap<(i32, i32), Box<Chunk>>,
}

impl ChunkedWorld {

    /// Create a new world full of air.
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            base: Box::new([(block::AIR, 0); CHUNK_HEIGHT]),
            chunks: HashMap::new(),
        }
    }

    /// Create a world whose missing chunks are made of the given layers, listed from the
    /// bottom as `(id, metadata, thickness)`. Layers above the world height are ignored.
    pub fn with_layers(seed: i64, layers: &[(u8, u8, u32)]) -> Self {
        let mut world = Self::new(seed);
        let mut y = 0usize;
        for &(id, metadata, thickness) in layers {
            for _ in 0..thickness {
                if y >= CHUNK_HEIGHT {
                    return world;
                }
                world.base[y] = (id, metadata & 0x0F);
                y += 1;
            }
        }
        world
    }

    /// Number of allocated chunks.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    fn base_height(&self) -> i32 {
        self.base.iter()
            .rposition(|&(id, _)| id != block::AIR)
            .map_or(0, |y| y as i32 + 1)
    }

    /// Get the chunk at the given chunk coordinates, allocating it from the base profile
    /// if missing.
    fn ensure_chunk(&mut self, cx: i32, cz: i32) -> &mut Chunk {
        let base = &self.base;
        self.chunks.entry((cx, cz)).or_insert_with(|| {
            let mut chunk = Chunk::new();
            for (y, &(id, metadata)) in base.iter().enumerate() {
                if id != block::AIR {
                    chunk.fill_block_and_metadata(
                        IVec3::new(0, y as i32, 0),
                        IVec3::new(CHUNK_WIDTH as i32, 1, CHUNK_WIDTH as i32),
                        id, metadata);
                }
            }
            chunk
        })
    }

}

impl VoxelAccess for ChunkedWorld {

    fn get_block(&self, pos: IVec3) -> (u8, u8) {
        let Some((cx, cz)) = calc_chunk_pos(pos) else {
            return (block::AIR, 0);
        };
        match self.chunks.get(&(cx, cz)) {
            Some(chunk) => chunk.block_and_metadata(pos),
            None => self.base[pos.y as usize],
        }
    }

    fn set_block(&mut self, pos: IVec3, id: u8, metadata: u8, _notify: bool) -> bool {
        let Some((cx, cz)) = calc_chunk_pos(pos) else {
            return false;
        };
        self.ensure_chunk(cx, cz).set_block_and_metadata(pos, id, metadata);
        true
    }

    fn get_chunk(&self, cx: i32, cz: i32) -> Option<&Chunk> {
        self.chunks.get(&(cx, cz)).map(|chunk| &**chunk)
    }

    fn set_chunk(&mut self, cx: i32, cz: i32, chunk: Box<Chunk>) {
        self.chunks.insert((cx, cz), chunk);
    }

    fn get_seed(&self) -> i64 {
        self.seed
    }

    fn get_height(&self, x: i32, z: i32) -> i32 {
        let pos = IVec3::new(x, 0, z);
        match self.chunks.get(&calc_chunk_pos_unchecked(pos)) {
            Some(chunk) => chunk.height(pos),
            None => self.base_height(),
        }
    }

}
