/// Builds a [`Document`](crate::Document) from braced section blocks.
///
/// Each block names a section and lists `key = value` entries; values are
/// scalars or bracketed lists of scalars. Keys and section names are bare
/// identifiers.
///
/// ```rust
/// use scf::doc;
///
/// let doc = doc! {
///     server {
///         port = 8080,
///         host = "localhost",
///         workers = [1, 2, 3],
///     }
///     logging {
///         verbose = true,
///     }
/// };
/// assert_eq!(doc.len(), 2);
/// assert_eq!(
///     scf::to_string(&doc),
///     "[server]\n  port = 8080\n  host = \"localhost\"\n  workers = [\n    1,\n    2,\n    3,\n  ]\n\n[logging]\n  verbose = true\n\n"
/// );
/// ```
///
/// Negative numeric literals are not valid entry values, matching the
/// textual format's grammar.
///
/// # Panics
///
/// Panics if the same key is given twice with values of different kinds.
#[macro_export]
macro_rules! doc {
    ( $( $section:ident { $( $key:ident = $value:tt ),* $(,)? } )* ) => {{
        #[allow(unused_mut)]
        let mut document = $crate::Document::new();
        $(
            $(
                $crate::doc!(@entry document, $section, $key, $value);
            )*
        )*
        document
    }};

    (@entry $doc:ident, $section:ident, $key:ident, [ $($elem:expr),* $(,)? ]) => {{
        let elements = vec![$($crate::Scalar::from($elem)),*];
        let kind = elements
            .first()
            .map($crate::Scalar::kind)
            .unwrap_or($crate::ValueKind::String);
        $doc.set_scalar_list(concat!(stringify!($section), ".", stringify!($key)), kind, elements)
            .expect("dotted key");
    }};

    (@entry $doc:ident, $section:ident, $key:ident, $value:expr) => {
        $doc.set(concat!(stringify!($section), ".", stringify!($key)), $value)
            .expect("dotted key")
    };
}

#[cfg(test)]
mod tests {
    use crate::{Scalar, ValueKind};

    #[test]
    fn test_doc_macro_empty() {
        let doc = doc! {};
        assert!(doc.is_empty());
    }

    #[test]
    fn test_doc_macro_scalars() {
        let doc = doc! {
            app {
                name = "demo",
                retries = 3,
                ratio = 0.5,
                enabled = true,
            }
        };
        let section = doc.section("app").unwrap();
        assert_eq!(
            section.get("name").unwrap().value().as_scalar(),
            Some(&Scalar::Str("demo".to_string()))
        );
        assert_eq!(
            section.get("retries").unwrap().value().as_scalar(),
            Some(&Scalar::Int(3))
        );
        assert_eq!(
            section.get("ratio").unwrap().value().as_scalar(),
            Some(&Scalar::Float(0.5))
        );
        assert_eq!(
            section.get("enabled").unwrap().value().as_scalar(),
            Some(&Scalar::Bool(true))
        );
    }

    #[test]
    fn test_doc_macro_lists() {
        let doc = doc! {
            s {
                nums = [1, 2, 3],
                empty = [],
            }
        };
        let section = doc.section("s").unwrap();
        let nums = section.get("nums").unwrap();
        assert_eq!(nums.value().element_kind(), Some(ValueKind::Integer));
        assert_eq!(
            nums.value().as_list(),
            Some(&[Scalar::Int(1), Scalar::Int(2), Scalar::Int(3)][..])
        );
        assert_eq!(
            section.get("empty").unwrap().value().element_kind(),
            Some(ValueKind::String)
        );
    }

    #[test]
    fn test_doc_macro_multiple_sections_keep_order() {
        let doc = doc! {
            beta { x = 1, }
            alpha { y = 2, }
        };
        let names: Vec<_> = doc.sections().map(|(name, _)| name).collect();
        assert_eq!(names, ["beta", "alpha"]);
    }
}
