/// Errors that can occur while building level content.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("terrain needs at least one subdivision and a positive size (got {subdivisions} subdivisions, size {size})")]
    InvalidTerrain { subdivisions: u32, size: f32 },

    #[error("maze needs at least one column and one row (got {columns}x{rows})")]
    EmptyMaze { columns: u32, rows: u32 },

    #[error("maze walls must be thinner than the cells they separate (cell {cell_size}, wall {wall_thickness})")]
    InvalidMazeWalls { cell_size: f32, wall_thickness: f32 },

    #[error("house walls need positive sizes and a door narrower than the house (width {width}, depth {depth}, door {door_width})")]
    InvalidHouse {
        width: f32,
        depth: f32,
        door_width: f32,
    },

    #[error("unknown level kind '{0}' (expected flat, open-field, maze or houses)")]
    UnknownLevel(String),
}
