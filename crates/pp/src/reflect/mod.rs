//! Row reflection: turns records, maps and `#[derive(Record)]` structs into
//! the column lists and row tuples INSERT and UPDATE render.
//!
//! Struct metadata (column names, skip flags) is computed once per concrete
//! type and cached; changing the rename function or the ignore-untagged knob
//! clears the cache.


use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::config;
use crate::error::{PpError, PpResult};
use crate::exp::{
    ColumnListExpression, Expr, IntoExpr, Record, UpdateExpression, parse_identifier,
};
use crate::value::{IsZero, Value};

/// Per-field options set through `#[pp(...)]` attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFlags {
    pub skip_insert: bool,
    pub skip_update: bool,
    pub default_if_empty: bool,
}

impl FieldFlags {
    pub const fn new() -> Self {
        Self {
            skip_insert: false,
            skip_update: false,
            default_if_empty: false,
        }
    }

    pub const fn skip_insert(mut self) -> Self {
        self.skip_insert = true;
        self
    }

    pub const fn skip_update(mut self) -> Self {
        self.skip_update = true;
        self
    }

    pub const fn default_if_empty(mut self) -> Self {
        self.default_if_empty = true;
        self
    }
}

/// Resolved metadata for one struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub field: &'static str,
    pub column: String,
    pub tagged: bool,
    /// Untagged while `ignore_untagged_fields` was on.
    pub ignored: bool,
    pub flags: FieldFlags,
}

/// The statement a struct row is projected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Insert,
    Update,
}

impl FieldMeta {
    /// `true` when the field contributes a column to `projection`.
    pub fn projected(&self, projection: Projection) -> bool {
        if self.ignored {
            return false;
        }
        match projection {
            Projection::Insert => !self.flags.skip_insert,
            Projection::Update => !self.flags.skip_update,
        }
    }
}

/// Collects field metadata from [`DbStruct::describe`].
#[derive(Debug, Default)]
pub struct FieldSet {
    fields: Vec<FieldMeta>,
}

impl FieldSet {
    /// Register a field. `column` is the explicit `#[db(column = "...")]` tag.
    pub fn field(&mut self, field: &'static str, column: Option<&'static str>, flags: FieldFlags) {
        let meta = match column {
            Some(column) => FieldMeta {
                field,
                column: column.to_string(),
                tagged: true,
                ignored: false,
                flags,
            },
            None => FieldMeta {
                field,
                column: config::rename_column(field),
                tagged: false,
                ignored: config::ignore_untagged_fields(),
                flags,
            },
        };
        self.fields.push(meta);
    }

    /// Merge the fields of a flattened struct.
    pub fn flatten<T: DbStruct>(&mut self) {
        T::describe(self);
    }
}

/// Collects field values from [`DbStruct::values`], in `describe` order.
#[derive(Debug, Default)]
pub struct RowWriter {
    cells: Vec<Option<Cell>>,
}

#[derive(Debug)]
struct Cell {
    value: Expr,
    zero: bool,
}

impl RowWriter {
    pub fn value<T>(&mut self, value: &T)
    where
        T: IntoExpr + IsZero + Clone,
    {
        self.cells.push(Some(Cell {
            zero: value.is_zero(),
            value: value.clone().into_expr(),
        }));
    }

    pub fn flatten<T: DbStruct>(&mut self, value: &T) {
        value.values(self);
    }

    /// Mark the next `count` fields as contributing no column.
    pub fn absent(&mut self, count: usize) {
        self.cells.extend((0..count).map(|_| None));
    }
}

/// Struct-to-column projection, implemented by `#[derive(Record)]`.
///
/// `describe` registers every field in declaration order and `values` must
/// write exactly one cell per registered field, in the same order.
pub trait DbStruct: Any {
    fn describe(fields: &mut FieldSet);

    fn values(&self, row: &mut RowWriter);
}

impl<T: DbStruct> DbStruct for Option<T> {
    fn describe(fields: &mut FieldSet) {
        T::describe(fields);
    }

    fn values(&self, row: &mut RowWriter) {
        match self {
            Some(inner) => inner.values(row),
            None => row.absent(column_map::<T>().len()),
        }
    }
}

impl<T: DbStruct> DbStruct for Box<T> {
    fn describe(fields: &mut FieldSet) {
        T::describe(fields);
    }

    fn values(&self, row: &mut RowWriter) {
        self.as_ref().values(row);
    }
}

/// Cached metadata for one struct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    fields: Vec<FieldMeta>,
}

impl ColumnMap {
    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

static COLUMN_MAPS: LazyLock<RwLock<HashMap<TypeId, Arc<ColumnMap>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Metadata for `T`, computed on first use.
pub fn column_map<T: DbStruct>() -> Arc<ColumnMap> {
    let id = TypeId::of::<T>();
    if let Some(map) = COLUMN_MAPS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
    {
        return Arc::clone(map);
    }

    let mut set = FieldSet::default();
    T::describe(&mut set);
    let map = Arc::new(ColumnMap { fields: set.fields });

    let mut cache = COLUMN_MAPS.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(id).or_insert(map))
}

/// Drop all cached struct metadata.
pub fn clear_cache() {
    COLUMN_MAPS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}

fn struct_columns<T: DbStruct>(value: &T, projection: Projection) -> BTreeMap<String, Expr> {
    let map = column_map::<T>();
    let mut row = RowWriter::default();
    value.values(&mut row);

    let mut out = BTreeMap::new();
    for (meta, cell) in map.fields().iter().zip(row.cells) {
        let Some(cell) = cell else { continue };
        if !meta.projected(projection) {
            continue;
        }
        let value = if meta.flags.default_if_empty && cell.zero {
            Expr::Default
        } else {
            cell.value
        };
        out.insert(meta.column.clone(), value);
    }
    out
}

/// The shape an INSERT row or UPDATE payload came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Record,
    Map,
    Struct { id: TypeId, name: &'static str },
    Unsupported(String),
}

impl RowKind {
    pub fn type_name(&self) -> &str {
        match self {
            RowKind::Record => "pp.Record",
            RowKind::Map => "map",
            RowKind::Struct { name, .. } => name,
            RowKind::Unsupported(name) => name,
        }
    }
}

/// One reflected row: its source shape and its sorted column values.
#[derive(Debug, Clone)]
pub struct RowInput {
    kind: RowKind,
    cols: BTreeMap<String, Expr>,
}

impl RowInput {
    pub fn record(record: Record) -> Self {
        Self {
            kind: RowKind::Record,
            cols: record.into_iter().collect(),
        }
    }

    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: IntoExpr,
    {
        Self {
            kind: RowKind::Map,
            cols: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_expr()))
                .collect(),
        }
    }

    /// Insertable columns of a derived struct.
    pub fn for_insert<T: DbStruct>(value: &T) -> Self {
        Self {
            kind: Self::struct_kind::<T>(),
            cols: struct_columns(value, Projection::Insert),
        }
    }

    /// Updatable columns of a derived struct.
    pub fn for_update<T: DbStruct>(value: &T) -> Self {
        Self {
            kind: Self::struct_kind::<T>(),
            cols: struct_columns(value, Projection::Update),
        }
    }

    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self {
            kind: RowKind::Unsupported(type_name.into()),
            cols: BTreeMap::new(),
        }
    }

    fn struct_kind<T: DbStruct>() -> RowKind {
        RowKind::Struct {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn kind(&self) -> &RowKind {
        &self.kind
    }

    pub fn columns(&self) -> &BTreeMap<String, Expr> {
        &self.cols
    }
}

fn format_keys<'a>(keys: impl IntoIterator<Item = &'a String>) -> String {
    let quoted: Vec<String> = keys.into_iter().map(|k| format!("{k:?}")).collect();
    format!("[{}]", quoted.join(","))
}

/// Validate rows and split them into a sorted column list and row tuples.
///
/// Every row must come from the same shape and carry the same column set.
pub fn insert_rows(rows: &[RowInput]) -> PpResult<(ColumnListExpression, Vec<Vec<Expr>>)> {
    let Some(first) = rows.first() else {
        return Ok((ColumnListExpression::default(), Vec::new()));
    };

    let mut vals = Vec::with_capacity(rows.len());
    for row in rows {
        if let RowKind::Unsupported(name) = &row.kind {
            return Err(PpError::UnsupportedInsertShape(name.clone()));
        }
        if row.kind != first.kind {
            return Err(PpError::RowTypeMismatch {
                expected: first.kind.type_name().to_string(),
                got: row.kind.type_name().to_string(),
            });
        }
        if !row.cols.keys().eq(first.cols.keys()) {
            return Err(PpError::RowKeyMismatch {
                expected: format_keys(first.cols.keys()),
                got: format_keys(row.cols.keys()),
            });
        }
        vals.push(row.cols.values().cloned().collect());
    }

    let cols = first
        .cols
        .keys()
        .map(|k| Expr::Ident(parse_identifier(k)))
        .collect::<Vec<_>>();
    Ok((ColumnListExpression::new(cols), vals))
}

/// An UPDATE SET payload: a reflected row or explicit assignments.
#[derive(Debug, Clone)]
pub enum UpdateSource {
    Row(RowInput),
    Exprs(Vec<UpdateExpression>),
}

/// Expand an UPDATE payload into `col=value` assignments in sorted key order.
pub fn update_expressions(source: &UpdateSource) -> PpResult<Vec<UpdateExpression>> {
    let exprs = match source {
        UpdateSource::Exprs(exprs) => exprs.clone(),
        UpdateSource::Row(row) => {
            if let RowKind::Unsupported(name) = &row.kind {
                return Err(PpError::UnsupportedUpdateShape(name.clone()));
            }
            row.cols
                .iter()
                .map(|(k, v)| UpdateExpression::new(parse_identifier(k), v.clone()))
                .collect()
        }
    };
    if exprs.is_empty() {
        return Err(PpError::NoUpdateValues);
    }
    Ok(exprs)
}

/// Conversion into INSERT rows.
///
/// Implemented for [`Record`], string-keyed maps, derived structs (and
/// references to them) and collections of those. Scalars convert into an
/// unsupported row that fails the build.
pub trait IntoRows {
    fn into_rows(self) -> Vec<RowInput>;
}

impl IntoRows for RowInput {
    fn into_rows(self) -> Vec<RowInput> {
        vec![self]
    }
}

impl IntoRows for Record {
    fn into_rows(self) -> Vec<RowInput> {
        vec![RowInput::record(self)]
    }
}

impl IntoRows for &Record {
    fn into_rows(self) -> Vec<RowInput> {
        vec![RowInput::record(self.clone())]
    }
}

impl<K: Into<String>, V: IntoExpr, S> IntoRows for HashMap<K, V, S> {
    fn into_rows(self) -> Vec<RowInput> {
        vec![RowInput::map(self)]
    }
}

impl<K: Into<String>, V: IntoExpr> IntoRows for BTreeMap<K, V> {
    fn into_rows(self) -> Vec<RowInput> {
        vec![RowInput::map(self)]
    }
}

impl<T: IntoRows> IntoRows for Vec<T> {
    fn into_rows(self) -> Vec<RowInput> {
        self.into_iter().flat_map(IntoRows::into_rows).collect()
    }
}

impl<T: IntoRows, const N: usize> IntoRows for [T; N] {
    fn into_rows(self) -> Vec<RowInput> {
        self.into_iter().flat_map(IntoRows::into_rows).collect()
    }
}

impl<T: IntoRows + Clone> IntoRows for &[T] {
    fn into_rows(self) -> Vec<RowInput> {
        self.iter().cloned().flat_map(IntoRows::into_rows).collect()
    }
}

macro_rules! impl_tuple_into_rows {
    ($($name:ident),+) => {
        impl<$($name: IntoRows),+> IntoRows for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_rows(self) -> Vec<RowInput> {
                let ($($name,)+) = self;
                let mut out = Vec::new();
                $(out.extend($name.into_rows());)+
                out
            }
        }
    };
}

impl_tuple_into_rows!(A);
impl_tuple_into_rows!(A, B);
impl_tuple_into_rows!(A, B, C);
impl_tuple_into_rows!(A, B, C, D);
impl_tuple_into_rows!(A, B, C, D, E);
impl_tuple_into_rows!(A, B, C, D, E, F);

/// Conversion into an UPDATE SET payload.
pub trait IntoUpdate {
    fn into_update(self) -> UpdateSource;
}

impl IntoUpdate for UpdateSource {
    fn into_update(self) -> UpdateSource {
        self
    }
}

impl IntoUpdate for Record {
    fn into_update(self) -> UpdateSource {
        UpdateSource::Row(RowInput::record(self))
    }
}

impl IntoUpdate for &Record {
    fn into_update(self) -> UpdateSource {
        UpdateSource::Row(RowInput::record(self.clone()))
    }
}

impl<K: Into<String>, V: IntoExpr, S> IntoUpdate for HashMap<K, V, S> {
    fn into_update(self) -> UpdateSource {
        UpdateSource::Row(RowInput::map(self))
    }
}

impl<K: Into<String>, V: IntoExpr> IntoUpdate for BTreeMap<K, V> {
    fn into_update(self) -> UpdateSource {
        UpdateSource::Row(RowInput::map(self))
    }
}

impl IntoUpdate for UpdateExpression {
    fn into_update(self) -> UpdateSource {
        UpdateSource::Exprs(vec![self])
    }
}

impl IntoUpdate for Vec<UpdateExpression> {
    fn into_update(self) -> UpdateSource {
        UpdateSource::Exprs(self)
    }
}

impl<const N: usize> IntoUpdate for [UpdateExpression; N] {
    fn into_update(self) -> UpdateSource {
        UpdateSource::Exprs(self.into())
    }
}

macro_rules! impl_unsupported_shape {
    ($($t:ty => $name:literal),* $(,)?) => {
        $(
            impl IntoRows for $t {
                fn into_rows(self) -> Vec<RowInput> {
                    vec![RowInput::unsupported($name)]
                }
            }

            impl IntoUpdate for $t {
                fn into_update(self) -> UpdateSource {
                    UpdateSource::Row(RowInput::unsupported($name))
                }
            }
        )*
    };
}

impl_unsupported_shape!(
    bool => "bool",
    i32 => "int32",
    i64 => "int64",
    u64 => "uint64",
    f64 => "float64",
    &str => "string",
    String => "string",
);

impl IntoRows for Value {
    fn into_rows(self) -> Vec<RowInput> {
        vec![RowInput::unsupported(self.type_name())]
    }
}

impl IntoUpdate for Value {
    fn into_update(self) -> UpdateSource {
        UpdateSource::Row(RowInput::unsupported(self.type_name()))
    }
}
