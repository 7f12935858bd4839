use epochguess::{guess, rank, EpochCatalog, Reference};

fn main() {
    let report = guess(["1700000000", "3912345678", "oops"]);

    for result in &report.results {
        let top = result.most_likely().expect("built-in catalog is never empty");
        let candidate = result.most_likely_candidate().expect("top epoch has a candidate");
        println!(
            "{} -> {} ({:?} UTC), {} from now",
            result.number(),
            top.name(),
            candidate.utc,
            result.most_likely_distance().expect("ranking is not empty"),
        );
    }
    for bad in report.bad_strings() {
        println!("rejected: {bad:?}");
    }

    let mac_only = EpochCatalog::default_catalog().restricted(|e| e.name().starts_with("Mac"));
    let ranked = rank(&mac_only, 750_000_000, Reference::sample().now());
    println!("among Mac epochs: {}", ranked[0]);
}
