//! Literal syntax for map-style inputs.

/// Build a [`Record`](crate::Record) row.
///
/// ```ignore
/// let row = pp::record! { "name" => "Test1", "address" => "111 Test Addr" };
/// pp::insert("items").rows(row);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($col:expr => $value:expr),+ $(,)?) => {
        $crate::Record::new()$(.with($col, $value))+
    };
}

/// Build an [`Ex`](crate::Ex) condition map; entries are joined with AND.
///
/// ```ignore
/// pp::from("items").where_(pp::ex! {
///     "a" => 1,
///     "b" => pp::op! { "gt" => 10, "lt" => 20 },
///     "c" => None::<i32>,
/// });
/// ```
#[macro_export]
macro_rules! ex {
    () => {
        $crate::Ex::new()
    };
    ($($col:expr => $value:expr),+ $(,)?) => {
        $crate::Ex::new()$(.with($col, $value))+
    };
}

/// Build an [`ExOr`](crate::ExOr) condition map; entries are joined with OR.
#[macro_export]
macro_rules! ex_or {
    () => {
        $crate::ExOr::new()
    };
    ($($col:expr => $value:expr),+ $(,)?) => {
        $crate::ExOr::new()$(.with($col, $value))+
    };
}

/// Build an [`Op`](crate::Op) operator map for one `ex!` entry.
///
/// Operator names: `eq`, `neq`, `gt`, `gte`, `lt`, `lte`, `in`, `notIn`,
/// `is`, `isNot`, `like`, `notLike`, `iLike`, `notILike`, `between`,
/// `notBetween`, and the regexp variants.
#[macro_export]
macro_rules! op {
    ($($name:expr => $operand:expr),+ $(,)?) => {
        $crate::Op::new()$(.with($name, $operand))+
    };
}

/// Build value rows for [`InsertDataset::vals`](crate::InsertDataset::vals).
///
/// ```ignore
/// pp::insert("items")
///     .cols(("address", "name"))
///     .vals(pp::vals![["111 Test Addr", "Test1"], ["112 Test Addr", "Test2"]]);
/// ```
#[macro_export]
macro_rules! vals {
    ($([$($value:expr),* $(,)?]),* $(,)?) => {
        ::std::vec![$(::std::vec![$($crate::exp::IntoExpr::into_expr($value)),*]),*]
    };
}
