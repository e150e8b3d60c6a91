//! Role store operations, including the guild→roles secondary index and
//! the bulk role family (`GetRoles`/`HasRoles`/`PutRoles`/`DelRoles`).

use crate::{index_insert, index_remove, CacheFlags, GuildResource, InMemoryCache, Reference};
use embergate_model::{GuildId, Role, RoleId};
use std::collections::HashMap;

impl InMemoryCache {
    /// Upsert a single role. `role.guild_id` must already be fixed up (see
    /// [`Role::with_guild_id`]); this never infers it.
    pub fn put_role(&self, role: Role) {
        if !self.enabled(CacheFlags::ROLES) {
            return;
        }
        let Some(guild_id) = role.guild_id else {
            return;
        };
        self.insert_role(guild_id, role);
    }

    /// Bulk upsert, as delivered by `GUILD_ROLE_CREATE`'s batched sibling
    /// or a full role-list refresh. Each role is fixed up with `guild_id`
    /// before insertion.
    pub fn put_roles(&self, guild_id: GuildId, roles: Vec<Role>) {
        if !self.enabled(CacheFlags::ROLES) {
            return;
        }
        for role in roles {
            self.insert_role(guild_id, role.with_guild_id(guild_id));
        }
    }

    fn insert_role(&self, guild_id: GuildId, role: Role) {
        let id = role.id;
        self.roles.insert(id, GuildResource { guild_id, value: role });
        index_insert(&self.guild_roles, guild_id, id);
    }

    pub fn role(&self, role_id: RoleId) -> Option<Reference<'_, RoleId, GuildResource<Role>>> {
        self.roles.get(&role_id).map(Reference::new)
    }

    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.enabled(CacheFlags::ROLES) && self.roles.contains_key(&role_id)
    }

    /// Whether every id in `role_ids` is currently cached.
    pub fn has_roles(&self, role_ids: &[RoleId]) -> bool {
        self.enabled(CacheFlags::ROLES) && role_ids.iter().all(|id| self.roles.contains_key(id))
    }

    /// Every id in `role_ids` that is currently cached, mapped to its role.
    /// Ids absent from the cache are silently omitted rather than erroring.
    pub fn get_roles(&self, role_ids: &[RoleId]) -> HashMap<RoleId, Role> {
        if !self.enabled(CacheFlags::ROLES) {
            return HashMap::new();
        }
        role_ids
            .iter()
            .filter_map(|id| self.roles.get(id).map(|r| (*id, r.value().clone())))
            .collect()
    }

    pub fn delete_role(&self, role_id: RoleId) -> bool {
        let Some((_, resource)) = self.roles.remove(&role_id) else {
            return false;
        };
        index_remove(&self.guild_roles, resource.guild_id(), &role_id);
        true
    }

    /// Batch-delete `role_ids`, returning whether any deletion occurred.
    ///
    /// There is no caller-supplied `guild_id`: `role_ids` may legitimately
    /// span several guilds (e.g. a permission sync touching roles across
    /// every guild a bot and a user share), so each id's owning guild is
    /// resolved from the primary role store itself rather than assumed.
    ///
    /// Ids are grouped by the guild resolved for them, then each guild's
    /// index is deleted from under a single held write guard covering
    /// that guild's whole share of the batch, including the empty-bucket
    /// cleanup. Deleting each id independently (read the index, drop the
    /// guard, remove from the primary store, re-acquire the index to drop
    /// the bucket if empty) would leave a window between the index read
    /// and the primary-store write where a concurrent `PutRoles` for the
    /// same guild could re-add an id this call is in the middle of
    /// removing, silently resurrecting it.
    pub fn del_roles(&self, role_ids: &[RoleId]) -> bool {
        let mut by_guild: HashMap<GuildId, Vec<RoleId>> = HashMap::new();
        for id in role_ids {
            if let Some(guild_id) = self.roles.get(id).map(|r| r.guild_id()) {
                by_guild.entry(guild_id).or_default().push(*id);
            }
        }

        let mut removed_any = false;
        for (guild_id, ids) in by_guild {
            let Some(mut entry) = self.guild_roles.get_mut(&guild_id) else {
                continue;
            };

            for id in &ids {
                if entry.remove(id) && self.roles.remove(id).is_some() {
                    removed_any = true;
                }
            }

            if entry.is_empty() {
                drop(entry);
                self.guild_roles.remove(&guild_id);
            }
        }

        removed_any
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// All roles still present in the primary store for `guild_id`; a role
    /// listed in the index but concurrently removed is silently omitted
    /// (§3 invariant 3, tolerated skew).
    pub fn guild_roles(&self, guild_id: GuildId) -> Option<HashMap<RoleId, Role>> {
        let ids: Vec<RoleId> = self.guild_roles.get(&guild_id)?.iter().copied().collect();

        Some(
            ids.into_iter()
                .filter_map(|id| self.roles.get(&id).map(|r| (id, r.value().clone())))
                .collect(),
        )
    }

    pub fn count_guild_roles(&self, guild_id: GuildId) -> usize {
        self.guild_roles.get(&guild_id).map_or(0, |ids| ids.len())
    }

    pub fn delete_guild_roles(&self, guild_id: GuildId) {
        if let Some((_, ids)) = self.guild_roles.remove(&guild_id) {
            for id in ids {
                self.roles.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::InMemoryCache;
    use embergate_model::Role;

    fn role(id: u64) -> Role {
        serde_json::from_str(&format!(
            r#"{{"id":"{id}","name":"r","colors":{{"primary_color":0}},"permissions":"0"}}"#
        ))
        .unwrap()
    }

    #[test]
    fn put_roles_fixes_up_guild_id() {
        let cache = InMemoryCache::new();
        cache.put_roles(9.into(), vec![role(1), role(2)]);

        assert_eq!(cache.role(1.into()).unwrap().guild_id().get(), 9);
        assert_eq!(cache.count_guild_roles(9.into()), 2);
    }

    #[test]
    fn del_roles_removes_only_named_ids() {
        let cache = InMemoryCache::new();
        cache.put_roles(9.into(), vec![role(1), role(2), role(3)]);

        let removed = cache.del_roles(&[1.into(), 2.into(), 99.into()]);
        assert!(removed);
        assert!(cache.role(1.into()).is_none());
        assert!(cache.role(3.into()).is_some());
        assert_eq!(cache.count_guild_roles(9.into()), 1);
    }

    #[test]
    fn del_roles_drops_bucket_when_emptied() {
        let cache = InMemoryCache::new();
        cache.put_roles(9.into(), vec![role(1)]);

        cache.del_roles(&[1.into()]);
        assert!(cache.guild_roles(9.into()).is_none());
    }

    #[test]
    fn del_roles_resolves_guild_id_per_role_across_guilds() {
        let cache = InMemoryCache::new();
        cache.put_roles(9.into(), vec![role(1)]);
        cache.put_roles(10.into(), vec![role(2)]);

        let removed = cache.del_roles(&[1.into(), 2.into()]);
        assert!(removed);
        assert!(cache.role(1.into()).is_none());
        assert!(cache.role(2.into()).is_none());
        assert!(cache.guild_roles(9.into()).is_none());
        assert!(cache.guild_roles(10.into()).is_none());
    }

    #[test]
    fn has_roles_requires_every_id_present() {
        let cache = InMemoryCache::new();
        cache.put_roles(9.into(), vec![role(1), role(2)]);

        assert!(cache.has_roles(&[1.into(), 2.into()]));
        assert!(!cache.has_roles(&[1.into(), 2.into(), 3.into()]));
    }

    #[test]
    fn get_roles_filters_to_present_ids() {
        let cache = InMemoryCache::new();
        cache.put_roles(9.into(), vec![role(1), role(2)]);

        let found = cache.get_roles(&[1.into(), 3.into()]);
        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&1.into()));
    }
}
