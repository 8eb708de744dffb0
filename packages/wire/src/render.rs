//! Generic renderer from [`Structure`] to XML text.
//!
//! Sequences do not get a wrapper element: every item is wrapped in the
//! parent's tag, producing repeated siblings. The gateway expects
//! `<lineItem>..</lineItem><lineItem>..</lineItem>`, never an array element.
//!
//! Text is written verbatim; no escaping is applied.

use crate::structure::Structure;

/// Render a structure as XML text, optionally wrapped in `tag`.
///
/// # Examples
/// ```
/// use anet_wire::render::render;
/// use anet_wire::structure::Structure;
///
/// let people = Structure::from(vec!["x", "y"]);
/// assert_eq!(render(&people, Some("People")), "<People>x</People><People>y</People>");
/// assert_eq!(render(&Structure::Absent, Some("People")), "");
/// ```
#[must_use]
pub fn render(value: &Structure, tag: Option<&str>) -> String {
    let mut out = String::new();
    render_into(&mut out, value, tag);
    out
}

fn render_into(out: &mut String, value: &Structure, tag: Option<&str>) {
    match value {
        Structure::Absent => {}
        Structure::Scalar(text) => wrapped(out, tag, |out| out.push_str(text)),
        Structure::Map(fields) => wrapped(out, tag, |out| {
            for (key, child) in fields.iter() {
                render_into(out, child, Some(key));
            }
        }),
        Structure::Seq(items) => {
            for item in items {
                wrapped(out, tag, |out| render_into(out, item, None));
            }
        }
    }
}

fn wrapped(out: &mut String, tag: Option<&str>, body: impl FnOnce(&mut String)) {
    if let Some(tag) = tag {
        out.push('<');
        out.push_str(tag);
        out.push('>');
    }
    body(out);
    if let Some(tag) = tag {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Fields;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_nested_document() {
        let value = Structure::map([
            ("Life", Structure::from(42_i64)),
            ("People", Structure::from(vec!["x", "y"])),
            ("Tree", Structure::map([("Species", "Oak")])),
        ]);

        assert_eq!(
            render(&value, Some("XML")),
            "<XML><Life>42</Life><People>x</People><People>y</People><Tree><Species>Oak</Species></Tree></XML>"
        );
    }

    #[test]
    fn test_render_outer_map_without_tag() {
        let value = Structure::map([(
            "XML",
            Structure::map([
                ("Life", Structure::from(42_i64)),
                (
                    "People",
                    Structure::from(vec!["Bootsy Collins", "Barack Obama", "Bill Evans"]),
                ),
                (
                    "Tree",
                    Structure::map([
                        ("Species", Structure::from("Oak")),
                        ("Height", Structure::from(45_i64)),
                        ("HeightUnit", Structure::from("Feet")),
                    ]),
                ),
            ]),
        )]);

        assert_eq!(
            render(&value, None),
            "<XML><Life>42</Life><People>Bootsy Collins</People><People>Barack Obama</People><People>Bill Evans</People><Tree><Species>Oak</Species><Height>45</Height><HeightUnit>Feet</HeightUnit></Tree></XML>"
        );
    }

    #[test]
    fn test_render_sequence_is_siblings_not_wrapper() {
        let value = Structure::from(vec!["A", "B", "C"]);
        assert_eq!(render(&value, Some("T")), "<T>A</T><T>B</T><T>C</T>");
    }

    #[test]
    fn test_render_sequence_of_maps() {
        let value = Structure::map([(
            "paymentProfiles",
            Structure::Seq(vec![
                Structure::map([("customerPaymentProfileId", "1")]),
                Structure::map([("customerPaymentProfileId", "2")]),
            ]),
        )]);
        assert_eq!(
            render(&value, None),
            "<paymentProfiles><customerPaymentProfileId>1</customerPaymentProfileId></paymentProfiles>\
             <paymentProfiles><customerPaymentProfileId>2</customerPaymentProfileId></paymentProfiles>"
        );
    }

    #[test]
    fn test_render_absent_is_empty() {
        assert_eq!(render(&Structure::Absent, None), "");
        assert_eq!(render(&Structure::Absent, Some("anything")), "");
    }

    #[test]
    fn test_render_absent_map_entry_is_skipped() {
        let value = Structure::map([("a", Structure::from("1")), ("b", Structure::Absent)]);
        assert_eq!(render(&value, Some("r")), "<r><a>1</a></r>");
    }

    #[test]
    fn test_render_scalar_without_tag_is_bare() {
        assert_eq!(render(&Structure::from("hello"), None), "hello");
        assert_eq!(render(&Structure::from(true), Some("createProfile")), "<createProfile>true</createProfile>");
    }

    #[test]
    fn test_render_empty_containers() {
        assert_eq!(render(&Structure::Seq(Vec::new()), Some("T")), "");
        assert_eq!(render(&Structure::Map(Fields::new()), Some("T")), "<T></T>");
    }

    #[test]
    fn test_render_absent_sequence_item_is_empty_element() {
        let value = Structure::Seq(vec![Structure::from("a"), Structure::Absent]);
        assert_eq!(render(&value, Some("T")), "<T>a</T><T></T>");
    }

    #[test]
    fn test_render_does_not_escape() {
        assert_eq!(render(&Structure::from("a&b"), Some("t")), "<t>a&b</t>");
    }
}
