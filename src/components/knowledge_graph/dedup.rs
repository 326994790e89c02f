use std::collections::HashSet;

use super::types::Link;

type Key = (String, String, String);

fn key(source: &str, label: &str, target: &str) -> Key {
	(source.to_owned(), label.to_owned(), target.to_owned())
}

/// Drop links whose relationship, in either direction, was already seen.
///
/// `a -knows-> b` and `b -knows-> a` collapse into whichever came first, and
/// the survivors keep their input order.
pub fn deduplicate(links: Vec<Link>) -> Vec<Link> {
	let mut seen: HashSet<Key> = HashSet::with_capacity(links.len() * 2);

	links
		.into_iter()
		.filter(|link| {
			let (source, target) = (link.source.id(), link.target.id());
			if seen.contains(&key(source, &link.label, target)) {
				return false;
			}
			seen.insert(key(source, &link.label, target));
			seen.insert(key(target, &link.label, source));
			true
		})
		.collect()
}
