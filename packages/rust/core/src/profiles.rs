//! Login-keyed lookup over public profile records.

use std::collections::HashMap;

use courseboard_shared::ProfileRecord;

/// Lookup table from contributor login to public profile attributes,
/// built once from the flat profile record set.
#[derive(Debug, Clone, Default)]
pub struct ProfileDirectory {
    by_login: HashMap<String, ProfileRecord>,
}

impl ProfileDirectory {
    /// Build the directory. Duplicate logins keep the later record, matching
    /// the last-write-wins policy used elsewhere in the pipeline.
    pub fn build(profiles: &[ProfileRecord]) -> Self {
        let mut by_login = HashMap::with_capacity(profiles.len());
        for profile in profiles {
            by_login.insert(profile.login.clone(), profile.clone());
        }
        Self { by_login }
    }

    /// Look up a profile by login. Absence is expected and non-fatal.
    pub fn get(&self, login: &str) -> Option<&ProfileRecord> {
        self.by_login.get(login)
    }

    pub fn len(&self) -> usize {
        self.by_login.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_login.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::profile;

    #[test]
    fn lookup_by_login() {
        let directory = ProfileDirectory::build(&[profile("alice", 1), profile("bob", 2)]);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("alice").unwrap().id, 1);
        assert!(directory.get("carol").is_none());
    }

    #[test]
    fn duplicate_login_keeps_later_record() {
        let mut first = profile("alice", 1);
        first.followers = 1;
        let mut second = profile("alice", 1);
        second.followers = 99;

        let directory = ProfileDirectory::build(&[first, second]);
        assert_eq!(directory.get("alice").unwrap().followers, 99);
    }
}
