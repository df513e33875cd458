//! Convenient imports for typical `pp` usage.
//!
//! ```ignore
//! use pp::prelude::*;
//! ```

pub use crate::{
    Dataset, DeleteDataset, Ex, ExOr, InsertDataset, Op, PpError, PpResult, Record, SelectDataset,
    TruncateDataset, UpdateDataset, Value, WaitOption,
};
pub use crate::{c, i, l, lit, on, star, t, using, v};
pub use crate::{ex, ex_or, op, record, vals};
