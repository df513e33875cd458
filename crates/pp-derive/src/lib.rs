//! Derive macros for pp
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod record;

/// Derive struct-to-column projection for INSERT rows and UPDATE payloads.
///
/// # Example
///
/// ```ignore
/// use pp::Record;
///
/// #[derive(Clone, Record)]
/// struct Item {
///     #[pp(skip_insert)]
///     id: i64,
///     #[db(column = "item_name")]
///     name: String,
///     #[pp(default_if_empty)]
///     address: String,
///     #[pp(flatten)]
///     audit: Option<Audit>,
/// }
///
/// pp::insert("items").rows(vec![item_a, item_b]);
/// pp::update("items").set(&item).where_(pp::c("id").eq(item.id));
/// ```
///
/// # Generated
///
/// - `pp::DbStruct` describing every column in field order
/// - `pp::IntoRows` and `pp::IntoUpdate` for the struct and references to it
///
/// # Attributes
///
/// - `#[db(column = "name")]` - Map field to a different column name
/// - `#[db(skip)]` - Ignore the field (or a whole flattened struct)
/// - `#[pp(skip_insert)]` - Leave the column out of INSERT
/// - `#[pp(skip_update)]` - Leave the column out of UPDATE
/// - `#[pp(default_if_empty)]` - Write `DEFAULT` when the value is its zero value
/// - `#[pp(flatten)]` - Merge the columns of a nested `Record` struct
///   (`Option<T>` contributes nothing when `None`)
/// - `#[pp(rename_all = "snake_case")]` on the struct - Derive column names
///   for untagged fields at compile time instead of through
///   `pp::config::set_column_rename_function`
///
/// Fields holding `Mutex`, `RwLock`, `Cell`, `RefCell`, `OnceCell`,
/// `OnceLock`, `PhantomData` or atomics are skipped automatically.
#[proc_macro_derive(Record, attributes(db, pp))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
