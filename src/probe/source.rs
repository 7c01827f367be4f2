// Wed Feb 11 2026 - Alex

use std::fmt::Write;

/// Synthesize the measurement translation unit: a static initialized array
/// whose elements the compiler fills with `sizeof`/`offsetof` results. The
/// values land in the object's .data section in declaration order, which is
/// what makes them recoverable without running anything.
pub fn synthesize(header: &str, class_name: &str, field_names: &[String]) -> String {
    let mut queries = vec![format!("sizeof ({})", class_name)];
    for field in field_names {
        queries.push(format!("offsetof ({}, {})", class_name, field));
    }

    let mut source = String::new();
    let _ = writeln!(source, "#include <cstdlib>");
    let _ = writeln!(source);
    let _ = writeln!(source, "#include <cstring>");
    let _ = writeln!(source, "#include <runtime/runtime.h>");
    let _ = writeln!(source, "#include <{}>", header);
    let _ = writeln!(source);
    let _ = writeln!(source, "unsigned int values[] =");
    let _ = writeln!(source, "{{");
    let _ = writeln!(source, "  {}", queries.join(",\n  "));
    let _ = writeln!(source, "}};");
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_comes_first_then_fields_in_request_order() {
        let source = synthesize(
            "runtime/mirror/art_field.h",
            "art::mirror::ArtField",
            &["access_flags_".to_string(), "field_dex_idx_".to_string()],
        );

        let size_at = source.find("sizeof (art::mirror::ArtField)").unwrap();
        let first = source
            .find("offsetof (art::mirror::ArtField, access_flags_)")
            .unwrap();
        let second = source
            .find("offsetof (art::mirror::ArtField, field_dex_idx_)")
            .unwrap();
        assert!(size_at < first);
        assert!(first < second);
    }

    #[test]
    fn test_includes_target_and_fixed_dependency_headers() {
        let source = synthesize("runtime/art_field.h", "art::ArtField", &[]);
        assert!(source.contains("#include <cstdlib>"));
        assert!(source.contains("#include <cstring>"));
        assert!(source.contains("#include <runtime/runtime.h>"));
        assert!(source.contains("#include <runtime/art_field.h>"));
    }

    #[test]
    fn test_no_fields_still_measures_size() {
        let source = synthesize("runtime/art_field.h", "art::ArtField", &[]);
        assert!(source.contains("sizeof (art::ArtField)"));
        assert!(!source.contains("offsetof"));
    }
}
