// src/macros.rs

/// Declares a text-stage record whose fields map one-to-one, in order, onto
/// the named flat-table columns.
macro_rules! raw_record {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident => $column:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: String),+
        }

        impl $crate::process::raw_table::RawRecord for $name {
            const COLUMNS: &'static [&'static str] = &[$($column),+];

            fn from_fields(
                fields: Vec<String>,
            ) -> Result<Self, $crate::process::Rejection> {
                if fields.len() != Self::COLUMNS.len() {
                    return Err($crate::process::Rejection::SchemaMismatch {
                        expected: Self::COLUMNS.len(),
                        found: fields.len(),
                    });
                }
                let mut it = fields.into_iter();
                Ok(Self {
                    $($field: it.next().unwrap_or_default()),+
                })
            }

            fn into_fields(self) -> Vec<String> {
                vec![$(self.$field),+]
            }
        }
    };
}
