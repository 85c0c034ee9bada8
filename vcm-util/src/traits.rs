/// Native "no information" detection, independent of any caller-supplied
/// unknown marker. Floating-point matrices use `NaN` the way tabular data
/// uses an `NA` placeholder; discrete element types carry no native
/// missing value and fall back to marker comparison alone.
pub trait MissingValue {
    fn is_missing(&self) -> bool {
        false
    }
}

impl MissingValue for f32 {
    fn is_missing(&self) -> bool {
        self.is_nan()
    }
}

impl MissingValue for f64 {
    fn is_missing(&self) -> bool {
        self.is_nan()
    }
}

impl MissingValue for char {}
impl MissingValue for u8 {}
impl MissingValue for u32 {}
impl MissingValue for u64 {}
impl MissingValue for usize {}
impl MissingValue for i32 {}
impl MissingValue for i64 {}
impl MissingValue for String {}
impl MissingValue for Box<str> {}
