use lopdf::{Dictionary, Object};

/// Build a page's resources dictionary from the image XObjects it paints
///
/// The dictionary carries:
/// 1. A ProcSet naming the grayscale and color image procedures
/// 2. The XObject map, only when at least one image is placed
pub fn page_resources(xobject_dict: &Dictionary) -> Dictionary {
    let mut resources = Dictionary::new();
    resources.set(
        "ProcSet",
        vec![
            Object::Name(b"PDF".to_vec()),
            Object::Name(b"ImageB".to_vec()),
            Object::Name(b"ImageC".to_vec()),
        ],
    );

    if !xobject_dict.is_empty() {
        resources.set("XObject", Object::Dictionary(xobject_dict.clone()));
    }

    resources
}
