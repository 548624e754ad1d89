use actor_framework::{
    ActorEntity, Direction, FrameworkError, PageRequest, ResourceActor, ResourceClient,
};
use async_trait::async_trait;
use std::cmp::Ordering;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Tank {
    id: u32,
    name: String,
    level: u32,
}

#[derive(Debug)]
struct TankCreate {
    name: String,
    level: u32,
}

#[derive(Debug)]
struct TankUpdate {
    name: Option<String>,
}

#[derive(Debug)]
enum TankAction {
    Fill(u32),
    Drain(u32),
}

#[derive(Debug)]
enum TankQuery {
    All,
    AtLeast(u32),
}

#[derive(Debug)]
enum TankSort {
    Id,
    Level,
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum TankError {
    #[error("tank name '{0}' already taken")]
    NameTaken(String),
    #[error("tank {id} holds {level}, cannot drain {requested}")]
    Insufficient { id: u32, level: u32, requested: u32 },
    #[error("name must not be blank")]
    BlankName,
}

#[async_trait]
impl ActorEntity for Tank {
    type Id = u32;
    type Create = TankCreate;
    type Update = TankUpdate;
    type Action = TankAction;
    type ActionResult = u32;
    type Query = TankQuery;
    type SortField = TankSort;
    type Context = ();
    type Error = TankError;

    fn from_create_params(id: u32, params: TankCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(TankError::BlankName);
        }
        Ok(Self {
            id,
            name: params.name,
            level: params.level,
        })
    }

    fn matches(&self, query: &TankQuery) -> bool {
        match query {
            TankQuery::All => true,
            TankQuery::AtLeast(min) => self.level >= *min,
        }
    }

    fn compare_by(&self, other: &Self, field: &TankSort) -> Ordering {
        match field {
            TankSort::Id => self.id.cmp(&other.id),
            TankSort::Level => self.level.cmp(&other.level),
        }
    }

    fn conflicts_with(&self, other: &Self) -> Option<TankError> {
        (self.name == other.name).then(|| TankError::NameTaken(self.name.clone()))
    }

    async fn on_update(&mut self, update: TankUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: TankAction, _ctx: &()) -> Result<u32, TankError> {
        match action {
            TankAction::Fill(n) => self.level += n,
            TankAction::Drain(n) => {
                if self.level < n {
                    return Err(TankError::Insufficient {
                        id: self.id,
                        level: self.level,
                        requested: n,
                    });
                }
                self.level -= n;
            }
        }
        Ok(self.level)
    }
}

fn start() -> ResourceClient<Tank> {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));
    client
}

async fn tank(client: &ResourceClient<Tank>, name: &str, level: u32) -> Tank {
    client
        .create(TankCreate {
            name: name.into(),
            level,
        })
        .await
        .unwrap()
}

fn entity_error(err: FrameworkError) -> TankError {
    err.into_entity_error::<TankError>().unwrap()
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let client = start();

    let created = tank(&client, "north", 10).await;
    assert_eq!(created.id, 1);

    let level = client
        .perform_action(created.id, TankAction::Fill(5))
        .await
        .unwrap();
    assert_eq!(level, 15);
    assert_eq!(client.get(1).await.unwrap().unwrap().level, 15);

    let updated = client
        .update(
            1,
            TankUpdate {
                name: Some("south".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "south");

    client.delete(1).await.unwrap();
    assert!(client.get(1).await.unwrap().is_none());
    assert!(!client.exists(1).await.unwrap());
}

#[tokio::test]
async fn test_failed_create_does_not_consume_an_id() {
    let client = start();

    let err = client
        .create(TankCreate {
            name: "  ".into(),
            level: 0,
        })
        .await
        .unwrap_err();
    assert_eq!(entity_error(err), TankError::BlankName);

    assert_eq!(tank(&client, "first", 0).await.id, 1);
}

#[tokio::test]
async fn test_failed_action_leaves_entity_untouched() {
    let client = start();
    tank(&client, "north", 3).await;

    let err = client
        .perform_action(1, TankAction::Drain(4))
        .await
        .unwrap_err();
    assert!(matches!(
        entity_error(err),
        TankError::Insufficient { level: 3, requested: 4, .. }
    ));
    assert_eq!(client.get(1).await.unwrap().unwrap().level, 3);
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let client = start();

    let err = client
        .perform_action(42, TankAction::Fill(1))
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(id) if id == "42"));

    let err = client.delete(42).await.unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(_)));
}

#[tokio::test]
async fn test_transaction_commits_all_or_nothing() {
    let client = start();
    tank(&client, "a", 5).await;
    tank(&client, "b", 1).await;

    // Second step fails: the first must not stick.
    let err = client
        .transact(vec![(1, TankAction::Drain(2)), (2, TankAction::Drain(2))])
        .await
        .unwrap_err();
    assert!(matches!(entity_error(err), TankError::Insufficient { id: 2, .. }));
    assert_eq!(client.get(1).await.unwrap().unwrap().level, 5);
    assert_eq!(client.get(2).await.unwrap().unwrap().level, 1);

    // Unknown id anywhere also rolls back.
    let err = client
        .transact(vec![(1, TankAction::Drain(1)), (9, TankAction::Fill(1))])
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(_)));
    assert_eq!(client.get(1).await.unwrap().unwrap().level, 5);

    let levels = client
        .transact(vec![(1, TankAction::Drain(2)), (2, TankAction::Fill(4))])
        .await
        .unwrap();
    assert_eq!(levels, vec![3, 5]);
    assert_eq!(client.get(1).await.unwrap().unwrap().level, 3);
    assert_eq!(client.get(2).await.unwrap().unwrap().level, 5);
}

#[tokio::test]
async fn test_transaction_repeated_id_sees_earlier_steps() {
    let client = start();
    tank(&client, "a", 5).await;

    // 3 + 3 > 5, even though each step alone would fit.
    let err = client
        .transact(vec![(1, TankAction::Drain(3)), (1, TankAction::Drain(3))])
        .await
        .unwrap_err();
    assert!(matches!(
        entity_error(err),
        TankError::Insufficient { level: 2, requested: 3, .. }
    ));
    assert_eq!(client.get(1).await.unwrap().unwrap().level, 5);
}

#[tokio::test]
async fn test_unique_constraint_on_create_and_update() {
    let client = start();
    tank(&client, "a", 0).await;
    tank(&client, "b", 0).await;

    let err = client
        .create(TankCreate {
            name: "a".into(),
            level: 0,
        })
        .await
        .unwrap_err();
    assert_eq!(entity_error(err), TankError::NameTaken("a".into()));

    let err = client
        .update(
            2,
            TankUpdate {
                name: Some("a".into()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(entity_error(err), TankError::NameTaken("a".into()));
    assert_eq!(client.get(2).await.unwrap().unwrap().name, "b");

    // Keeping its own name is not a conflict.
    let same = client
        .update(
            2,
            TankUpdate {
                name: Some("b".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(same.name, "b");
}

#[tokio::test]
async fn test_find_and_find_page() {
    let client = start();
    for (name, level) in [("a", 4), ("b", 9), ("c", 4), ("d", 1)] {
        tank(&client, name, level).await;
    }

    let found = client.find(TankQuery::AtLeast(4)).await.unwrap();
    let ids: Vec<u32> = found.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let page = client
        .find_page(
            TankQuery::All,
            PageRequest::new(0, 3, TankSort::Level, Direction::Desc),
        )
        .await
        .unwrap();
    let ids: Vec<u32> = page.content.iter().map(|t| t.id).collect();
    // Ties (1 and 3 at level 4) keep ascending id order.
    assert_eq!(ids, vec![2, 1, 3]);
    assert_eq!(page.total_elements, 4);
    assert_eq!(page.total_pages, 2);

    let last = client
        .find_page(
            TankQuery::All,
            PageRequest::new(1, 3, TankSort::Id, Direction::Asc),
        )
        .await
        .unwrap();
    assert_eq!(last.content.len(), 1);
    assert_eq!(last.content[0].name, "d");
    assert!(last.is_last());

    let err = client
        .find_page(
            TankQuery::All,
            PageRequest::new(0, 0, TankSort::Id, Direction::Asc),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::InvalidPage(_)));
}

#[tokio::test]
async fn test_concurrent_drains_never_oversell() {
    let client = start();
    tank(&client, "shared", 10).await;

    let mut handles = Vec::new();
    for _ in 0..25 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(1, TankAction::Drain(1)).await.is_ok()
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 10);
    assert_eq!(client.get(1).await.unwrap().unwrap().level, 0);
}

#[tokio::test]
async fn test_client_reports_closed_actor() {
    let (actor, client) = ResourceActor::<Tank>::new(1);
    drop(actor);

    let err = client.get(1).await.unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
}
