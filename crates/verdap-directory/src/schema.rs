//! Typed entry schema
//!
//! Each entry kind is a plain record internally and serializes to the generic
//! name/values form only at the protocol boundary. The attribute vocabulary,
//! value formats, and insertion order are a wire contract; clients key
//! lookups off names like `gidNumber` and `homeDirectory`.

use verdap_core::{Entry, ACCOUNT_STATUS, HOME_PREFIX, LOGIN_SHELL};

pub const OC_POSIX_ACCOUNT: &str = "posixAccount";
pub const OC_POSIX_GROUP: &str = "posixGroup";
pub const OC_FRUITS: &str = "fruits";
pub const OC_VEGETABLES: &str = "vegetables";

/// A stock item entry, either category.
#[derive(Debug, Clone)]
pub struct InventoryEntry {
    pub name: String,
    pub description: String,
    pub stock: i64,
    pub object_class: &'static str,
}

impl InventoryEntry {
    /// Both categories live under the fruits container; only the objectClass
    /// tells them apart. Deployed clients depend on this DN shape.
    pub fn dn(&self, base_dn: &str) -> String {
        format!("cn={},ou=fruits,{}", self.name, base_dn)
    }

    pub fn into_entry(self, base_dn: &str) -> Entry {
        let mut entry = Entry::new(self.dn(base_dn));
        entry.push_attr("cn", vec![self.name]);
        entry.push_attr("stock", vec![self.stock.to_string()]);
        entry.push_attr("description", vec![self.description]);
        entry.push_attr("objectClass", vec![self.object_class.to_string()]);
        entry
    }
}

/// A posix group entry with its derived member lists.
#[derive(Debug, Clone)]
pub struct GroupEntry {
    pub name: String,
    pub gid: u32,
    pub member_dns: Vec<String>,
    pub member_uids: Vec<String>,
}

impl GroupEntry {
    pub fn dn(&self, base_dn: &str) -> String {
        format!("cn={},ou=groups,{}", self.name, base_dn)
    }

    pub fn into_entry(self, base_dn: &str) -> Entry {
        let mut entry = Entry::new(self.dn(base_dn));
        let description = format!("{} via LDAP", self.name);
        entry.push_attr("cn", vec![self.name]);
        entry.push_attr("description", vec![description]);
        entry.push_attr("gidNumber", vec![self.gid.to_string()]);
        entry.push_attr("objectClass", vec![OC_POSIX_GROUP.to_string()]);
        entry.push_attr("uniqueMember", self.member_dns);
        entry.push_attr("memberUid", self.member_uids);
        entry
    }
}

/// A posix account entry. The container is the user's primary group name.
#[derive(Debug, Clone)]
pub struct AccountEntry {
    pub name: String,
    pub primary_group_name: String,
    pub primary_gid: u32,
    pub uid_number: u32,
    pub description: String,
    pub gecos: String,
    pub member_of: Vec<String>,
    pub ssh_keys: Vec<String>,
}

impl AccountEntry {
    pub fn dn(&self, base_dn: &str) -> String {
        format!("cn={},ou={},{}", self.name, self.primary_group_name, base_dn)
    }

    pub fn into_entry(self, base_dn: &str) -> Entry {
        let mut entry = Entry::new(self.dn(base_dn));
        let home = format!("{}{}", HOME_PREFIX, self.name);
        entry.push_attr("cn", vec![self.name.clone()]);
        entry.push_attr("uid", vec![self.name]);
        entry.push_attr("ou", vec![self.primary_group_name]);
        entry.push_attr("uidNumber", vec![self.uid_number.to_string()]);
        entry.push_attr("accountStatus", vec![ACCOUNT_STATUS.to_string()]);
        entry.push_attr("objectClass", vec![OC_POSIX_ACCOUNT.to_string()]);
        entry.push_attr("homeDirectory", vec![home]);
        entry.push_attr("loginShell", vec![LOGIN_SHELL.to_string()]);
        entry.push_attr("description", vec![self.description]);
        entry.push_attr("gecos", vec![self.gecos]);
        entry.push_attr("gidNumber", vec![self.primary_gid.to_string()]);
        entry.push_attr("memberOf", self.member_of);
        // sshPublicKey is omitted entirely for keyless users, not emitted empty
        if !self.ssh_keys.is_empty() {
            entry.push_attr("sshPublicKey", self.ssh_keys);
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vegetables_share_the_fruits_container() {
        let veg = InventoryEntry {
            name: "carrot".into(),
            description: "orange and crunchy".into(),
            stock: 7,
            object_class: OC_VEGETABLES,
        };
        let entry = veg.into_entry("dc=hack,dc=me");
        assert_eq!(entry.dn, "cn=carrot,ou=fruits,dc=hack,dc=me");
        assert_eq!(entry.first_value("objectClass"), Some("vegetables"));
        assert_eq!(entry.first_value("stock"), Some("7"));
    }

    #[test]
    fn account_attribute_order_is_stable() {
        let account = AccountEntry {
            name: "alice".into(),
            primary_group_name: "staff".into(),
            primary_gid: 100,
            uid_number: 5000,
            description: "".into(),
            gecos: "Alice".into(),
            member_of: vec!["cn=admins,ou=groups,dc=hack,dc=me".into()],
            ssh_keys: vec![],
        };
        let entry = account.into_entry("dc=hack,dc=me");
        let names: Vec<&str> = entry.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "cn",
                "uid",
                "ou",
                "uidNumber",
                "accountStatus",
                "objectClass",
                "homeDirectory",
                "loginShell",
                "description",
                "gecos",
                "gidNumber",
                "memberOf",
            ]
        );
        assert_eq!(entry.first_value("homeDirectory"), Some("/home/alice"));
        assert_eq!(entry.first_value("loginShell"), Some("/bin/bash"));
    }

    #[test]
    fn ssh_keys_attribute_is_omitted_when_empty() {
        let keyless = AccountEntry {
            name: "bob".into(),
            primary_group_name: "staff".into(),
            primary_gid: 100,
            uid_number: 5001,
            description: String::new(),
            gecos: String::new(),
            member_of: vec![],
            ssh_keys: vec![],
        };
        assert!(keyless.into_entry("dc=hack,dc=me").attr("sshPublicKey").is_none());

        let keyed = AccountEntry {
            name: "carol".into(),
            primary_group_name: "staff".into(),
            primary_gid: 100,
            uid_number: 5002,
            description: String::new(),
            gecos: String::new(),
            member_of: vec![],
            ssh_keys: vec!["ssh-ed25519 AAAA... carol@lab".into()],
        };
        let entry = keyed.into_entry("dc=hack,dc=me");
        assert_eq!(entry.attr("sshPublicKey").unwrap().values.len(), 1);
    }
}
