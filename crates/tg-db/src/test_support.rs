//! Shared test utilities for tg-db unit tests.

pub(crate) mod helpers {
    use tg_core::identity::Actor;

    use crate::ThinkgraphDb;
    use crate::service::ThinkgraphService;
    use crate::trail::writer::TrailWriter;

    /// In-memory service with trail disabled (for pure DB tests).
    pub async fn test_service() -> ThinkgraphService {
        let db = ThinkgraphDb::open_local(":memory:").await.unwrap();
        ThinkgraphService::from_db(db, TrailWriter::disabled())
    }

    /// In-memory service with trail enabled writing to `trail_dir`.
    pub async fn test_service_with_trail(trail_dir: std::path::PathBuf) -> ThinkgraphService {
        let db = ThinkgraphDb::open_local(":memory:").await.unwrap();
        let trail = TrailWriter::new(trail_dir).unwrap();
        ThinkgraphService::from_db(db, trail)
    }

    pub fn alice() -> Actor {
        Actor::new("usr-alice", "team-1")
    }

    pub fn bob() -> Actor {
        Actor::new("usr-bob", "team-1")
    }

    /// Same user id as `alice`, different team.
    pub fn alice_elsewhere() -> Actor {
        Actor::new("usr-alice", "team-2")
    }
}

pub(crate) mod memory_store {
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tg_core::path;

    use crate::error::DatabaseError;
    use crate::hierarchy::{DecisionTreeStore, PositionUpdate, TreeNode};

    /// `DecisionTreeStore` over a map keyed by `(team, id)`.
    #[derive(Default)]
    pub struct MemoryStore {
        nodes: Mutex<BTreeMap<(String, String), TreeNode>>,
        writes: AtomicUsize,
    }

    impl MemoryStore {
        /// Insert a node positioned under `parent` (which must already exist).
        pub fn insert(&self, team: &str, id: &str, parent: Option<&str>, order: f64) {
            let mut nodes = self.nodes.lock().unwrap();
            let (path, depth) = match parent {
                Some(p) => {
                    let parent = &nodes[&(team.to_string(), p.to_string())];
                    (path::child_path(&parent.path, id), parent.depth + 1)
                }
                None => (path::root_path(id), 0),
            };
            nodes.insert(
                (team.to_string(), id.to_string()),
                TreeNode {
                    id: id.to_string(),
                    parent_id: parent.map(String::from),
                    path,
                    depth,
                    order,
                },
            );
        }

        pub fn get(&self, team: &str, id: &str) -> Option<TreeNode> {
            self.nodes
                .lock()
                .unwrap()
                .get(&(team.to_string(), id.to_string()))
                .cloned()
        }

        /// All nodes of `team`, ordered by id.
        pub fn snapshot(&self, team: &str) -> Vec<TreeNode> {
            self.nodes
                .lock()
                .unwrap()
                .iter()
                .filter(|((t, _), _)| t == team)
                .map(|(_, n)| n.clone())
                .collect()
        }

        pub fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        /// Panic unless every node's path and depth agree with its parent.
        pub fn assert_consistent(&self, team: &str) {
            let nodes = self.snapshot(team);
            for node in &nodes {
                match &node.parent_id {
                    None => {
                        assert_eq!(node.path, path::root_path(&node.id), "{}", node.id);
                        assert_eq!(node.depth, 0, "{}", node.id);
                    }
                    Some(pid) => {
                        let parent = nodes.iter().find(|n| &n.id == pid).unwrap();
                        assert_eq!(node.path, path::child_path(&parent.path, &node.id));
                        assert_eq!(node.depth, parent.depth + 1, "{}", node.id);
                    }
                }
            }
        }
    }

    impl DecisionTreeStore for MemoryStore {
        async fn find_by_id(
            &self,
            team_id: &str,
            id: &str,
        ) -> Result<Option<TreeNode>, DatabaseError> {
            Ok(self.get(team_id, id))
        }

        async fn find_by_path_prefix(
            &self,
            team_id: &str,
            prefix: &str,
            exclude_id: &str,
        ) -> Result<Vec<TreeNode>, DatabaseError> {
            Ok(self
                .snapshot(team_id)
                .into_iter()
                .filter(|n| n.id != exclude_id && path::is_within(&n.path, prefix))
                .collect())
        }

        async fn update_position(
            &self,
            team_id: &str,
            id: &str,
            update: &PositionUpdate,
        ) -> Result<Option<TreeNode>, DatabaseError> {
            let mut nodes = self.nodes.lock().unwrap();
            let Some(node) = nodes.get_mut(&(team_id.to_string(), id.to_string())) else {
                return Ok(None);
            };
            self.writes.fetch_add(1, Ordering::SeqCst);
            if let Some(ref parent_id) = update.parent_id {
                node.parent_id.clone_from(parent_id);
            }
            if let Some(ref p) = update.path {
                node.path.clone_from(p);
            }
            if let Some(depth) = update.depth {
                node.depth = depth;
            }
            if let Some(order) = update.order {
                node.order = order;
            }
            Ok(Some(node.clone()))
        }
    }

    /// Delegates to another store but fails the `fail_on`-th position write.
    pub struct FailingStore<S> {
        inner: S,
        fail_on: usize,
        calls: AtomicUsize,
    }

    impl<S: DecisionTreeStore> FailingStore<S> {
        pub fn new(inner: S, fail_on: usize) -> Self {
            Self {
                inner,
                fail_on,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl<S: DecisionTreeStore> DecisionTreeStore for FailingStore<S> {
        async fn find_by_id(
            &self,
            team_id: &str,
            id: &str,
        ) -> Result<Option<TreeNode>, DatabaseError> {
            self.inner.find_by_id(team_id, id).await
        }

        async fn find_by_path_prefix(
            &self,
            team_id: &str,
            prefix: &str,
            exclude_id: &str,
        ) -> Result<Vec<TreeNode>, DatabaseError> {
            self.inner
                .find_by_path_prefix(team_id, prefix, exclude_id)
                .await
        }

        async fn update_position(
            &self,
            team_id: &str,
            id: &str,
            update: &PositionUpdate,
        ) -> Result<Option<TreeNode>, DatabaseError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_on {
                return Err(DatabaseError::Query("injected write failure".into()));
            }
            self.inner.update_position(team_id, id, update).await
        }
    }
}
