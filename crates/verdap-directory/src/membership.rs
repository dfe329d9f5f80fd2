//! Group membership resolution
//!
//! Derives group rosters and user DNs from the configuration records. A user
//! belongs to a group when it is their primary group or listed among their
//! other groups; both contribute to the same roster. Output order follows
//! configuration order, with duplicate gid references collapsed.

use tracing::warn;
use verdap_core::config::{Group, User, VerdapConfig};

pub struct MembershipResolver<'a> {
    users: &'a [User],
    groups: &'a [Group],
    base_dn: &'a str,
}

impl<'a> MembershipResolver<'a> {
    pub fn new(config: &'a VerdapConfig) -> Self {
        Self {
            users: &config.users,
            groups: &config.groups,
            base_dn: &config.directory.base_dn,
        }
    }

    pub fn group_by_gid(&self, gid: u32) -> Option<&'a Group> {
        self.groups.iter().find(|g| g.gid == gid)
    }

    pub fn group_by_name(&self, name: &str) -> Option<&'a Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn user_by_name(&self, name: &str) -> Option<&'a User> {
        self.users.iter().find(|u| u.name == name)
    }

    /// Resolved name of a gid, or the empty string for a dangling reference.
    pub fn group_name(&self, gid: u32) -> &'a str {
        match self.group_by_gid(gid) {
            Some(group) => &group.name,
            None => {
                warn!(gid, "reference to unknown group");
                ""
            }
        }
    }

    pub fn group_dn(&self, group: &Group) -> String {
        format!("cn={},ou=groups,{}", group.name, self.base_dn)
    }

    /// A user's DN sits under the container named after their primary group.
    pub fn user_dn(&self, user: &User) -> String {
        format!(
            "cn={},ou={},{}",
            user.name,
            self.group_name(user.primary_group),
            self.base_dn
        )
    }

    fn members_of(&self, gid: u32) -> impl Iterator<Item = &'a User> + '_ {
        self.users
            .iter()
            .filter(move |u| u.primary_group == gid || u.other_groups.contains(&gid))
    }

    pub fn group_member_uids(&self, gid: u32) -> Vec<String> {
        self.members_of(gid).map(|u| u.name.clone()).collect()
    }

    pub fn group_member_dns(&self, gid: u32) -> Vec<String> {
        self.members_of(gid).map(|u| self.user_dn(u)).collect()
    }

    /// DNs for every resolvable id in the user's secondary-group list, in
    /// configuration order and without duplicates. A redundantly listed
    /// primary group is kept.
    pub fn secondary_group_dns(&self, user: &User) -> Vec<String> {
        let mut dns = Vec::new();
        for gid in &user.other_groups {
            if let Some(group) = self.group_by_gid(*gid) {
                let dn = self.group_dn(group);
                if !dns.contains(&dn) {
                    dns.push(dn);
                }
            } else {
                warn!(user = %user.name, gid, "membership in unknown group ignored");
            }
        }
        dns
    }
}
