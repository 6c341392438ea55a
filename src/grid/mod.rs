//! Dense per-pixel grid buffers shared by every pipeline stage.
//!
//! All stages exchange data as row-major `width × height` buffers with
//! `stride == width`: 3D points, unit normals, color triplets and segment
//! labels. [`Grid`] is the one owned container; the concrete pixel types and
//! their reserved sentinel values live in [`fields`].

pub mod buffer;
pub mod fields;
pub mod traits;

pub use self::buffer::Grid;
pub use self::fields::{
    is_measured_point, is_valid_normal, ColorGrid, LabelGrid, NormalGrid, PointGrid,
    EMPTY_LABEL, INVALID_NORMAL, MAX_RANGE,
};
pub use self::traits::{GridView, GridViewMut, Rows};
