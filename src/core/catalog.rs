use std::collections::HashSet;

/// Split `text` into a known make and a known model
///
/// Every whitespace position is tried from left to right and the first split
/// whose left side is a known make and whose right side is a known model wins,
/// so the shortest matching make is preferred. Makes and models may contain
/// spaces themselves.
pub fn resolve(
    text: &str,
    makes: &HashSet<String>,
    models: &HashSet<String>,
) -> Option<(String, String)> {
    text.char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .find_map(|(i, _)| {
            let make = text[..i].trim_end();
            let model = text[i..].trim_start();

            if make.is_empty() || model.is_empty() {
                return None;
            }

            if makes.contains(make) && models.contains(model) {
                Some((make.to_string(), model.to_string()))
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_resolve_single_word_make_and_model() {
        let resolved = resolve("toyota corolla", &set(&["toyota"]), &set(&["corolla"]));
        assert_eq!(resolved, Some(("toyota".to_string(), "corolla".to_string())));
    }

    #[test]
    fn test_resolve_multi_word_make() {
        let resolved = resolve(
            "land rover discovery",
            &set(&["land rover"]),
            &set(&["discovery"]),
        );
        assert_eq!(resolved, Some(("land rover".to_string(), "discovery".to_string())));
    }

    #[test]
    fn test_resolve_multi_word_model() {
        let resolved = resolve(
            "land rover range rover sport",
            &set(&["land rover"]),
            &set(&["range rover sport"]),
        );
        assert_eq!(
            resolved,
            Some(("land rover".to_string(), "range rover sport".to_string()))
        );
    }

    #[test]
    fn test_resolve_prefers_shortest_make() {
        // Both "alfa | romeo giulia" and "alfa romeo | giulia" are valid
        let makes = set(&["alfa", "alfa romeo"]);
        let models = set(&["romeo giulia", "giulia"]);

        let resolved = resolve("alfa romeo giulia", &makes, &models);
        assert_eq!(resolved, Some(("alfa".to_string(), "romeo giulia".to_string())));
    }

    #[test]
    fn test_resolve_unknown() {
        let resolved = resolve(
            "unknownmake unknownmodel",
            &set(&["toyota", "honda"]),
            &set(&["corolla", "civic"]),
        );
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_resolve_requires_both_sides() {
        assert_eq!(resolve("toyota", &set(&["toyota"]), &set(&["corolla"])), None);
        assert_eq!(resolve("", &set(&["toyota"]), &set(&["corolla"])), None);
        assert_eq!(resolve("toyota civic", &set(&["toyota"]), &set(&["corolla"])), None);
    }

    #[test]
    fn test_resolve_tolerates_whitespace_runs() {
        let resolved = resolve("toyota   corolla", &set(&["toyota"]), &set(&["corolla"]));
        assert_eq!(resolved, Some(("toyota".to_string(), "corolla".to_string())));
    }
}
