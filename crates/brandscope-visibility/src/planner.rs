//! Search query planning for article discovery.

/// Editorial domains the second query is restricted to.
const EDITORIAL_SITES: &[&str] = &[
    "forbes.com",
    "businessinsider.com",
    "wirecutter.com",
    "goodhousekeeping.com",
    "reviewed.com",
];

/// Ordered search queries for `brand`, most information-dense first.
///
/// Callers issue only a short prefix of this list, so reordering changes
/// which content gets discovered. The brand is embedded verbatim.
#[must_use]
pub fn plan_queries(brand: &str) -> Vec<String> {
    let sites = EDITORIAL_SITES
        .iter()
        .map(|site| format!("site:{site}"))
        .collect::<Vec<_>>()
        .join(" OR ");

    vec![
        format!("best {brand} review"),
        format!("{brand} editorial review {sites}"),
        format!("\"{brand}\" recommended buying guide"),
        format!("{brand} top products ranked"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_query_comes_first() {
        let queries = plan_queries("Acme");
        assert_eq!(queries[0], "best Acme review");
    }

    #[test]
    fn editorial_query_restricts_to_sites() {
        let queries = plan_queries("Acme");
        assert_eq!(
            queries[1],
            "Acme editorial review site:forbes.com OR site:businessinsider.com OR \
             site:wirecutter.com OR site:goodhousekeeping.com OR site:reviewed.com"
        );
    }

    #[test]
    fn plans_four_queries_in_fixed_order() {
        let queries = plan_queries("Blue Bottle");
        assert_eq!(queries.len(), 4);
        assert_eq!(queries[2], "\"Blue Bottle\" recommended buying guide");
        assert_eq!(queries[3], "Blue Bottle top products ranked");
    }
}
