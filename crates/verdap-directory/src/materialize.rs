//! Directory materialization
//!
//! Expands the configuration records into the full entry set. Order is fixed:
//! vegetables, fruits, groups, users, each table in configuration order. The
//! output depends only on the configuration, so repeated calls agree.

use tracing::trace;
use verdap_core::{config::VerdapConfig, Entry};

use crate::membership::MembershipResolver;
use crate::schema::{AccountEntry, GroupEntry, InventoryEntry, OC_FRUITS, OC_VEGETABLES};

pub fn materialize(config: &VerdapConfig) -> Vec<Entry> {
    let base_dn = &config.directory.base_dn;
    let resolver = MembershipResolver::new(config);
    let mut entries =
        Vec::with_capacity(config.vegetables.len() + config.fruits.len() + config.groups.len() + config.users.len());

    for item in &config.vegetables {
        entries.push(
            InventoryEntry {
                name: item.name.clone(),
                description: item.description.clone(),
                stock: item.stock,
                object_class: OC_VEGETABLES,
            }
            .into_entry(base_dn),
        );
    }

    for item in &config.fruits {
        entries.push(
            InventoryEntry {
                name: item.name.clone(),
                description: item.description.clone(),
                stock: item.stock,
                object_class: OC_FRUITS,
            }
            .into_entry(base_dn),
        );
    }

    for group in &config.groups {
        entries.push(
            GroupEntry {
                name: group.name.clone(),
                gid: group.gid,
                member_dns: resolver.group_member_dns(group.gid),
                member_uids: resolver.group_member_uids(group.gid),
            }
            .into_entry(base_dn),
        );
    }

    for user in &config.users {
        entries.push(
            AccountEntry {
                name: user.name.clone(),
                primary_group_name: resolver.group_name(user.primary_group).to_string(),
                primary_gid: user.primary_group,
                uid_number: user.uid_number,
                description: user.description.clone(),
                gecos: user.gecos.clone(),
                member_of: resolver.secondary_group_dns(user),
                ssh_keys: user.ssh_keys.clone(),
            }
            .into_entry(base_dn),
        );
    }

    trace!(count = entries.len(), "materialized directory");
    entries
}
