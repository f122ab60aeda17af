use rand::{distributions::Alphanumeric, Rng};

/// Generate a new entity identifier with the given prefix, e.g. `usr_h1x9k2...`.
///
/// The random part is 20 lowercase alphanumeric characters, which is more than enough entropy for the
/// uniqueness constraints in the store to act as the final arbiter.
pub fn new_entity_id(prefix: &str) -> String {
    let suffix: String =
        rand::thread_rng().sample_iter(&Alphanumeric).take(20).map(|c| (c as char).to_ascii_lowercase()).collect();
    format!("{prefix}_{suffix}")
}
