#[macro_export]
macro_rules! entry {
    ( $key: expr, $value: expr) => {
        $crate::Entry {
            key: $key.into(),
            value: $value.into(),
        }
    };
}
