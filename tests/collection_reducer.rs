use eportfolio::api::courses::Course;
use eportfolio::api::Pagination;
use eportfolio::store::mvi::Reducer;
use eportfolio::store::{CollectionIntent, CollectionReducer, CollectionState, FetchStatus};

type State = CollectionState<Course>;
type Intent = CollectionIntent<Course>;

fn reduce(state: State, intent: Intent) -> State {
    CollectionReducer::<Course>::reduce(state, intent)
}

fn course(id: &str) -> Course {
    Course {
        id: id.to_string(),
        name: format!("Course {id}"),
        code: String::new(),
        level: None,
        sector: None,
        status: None,
        units: Vec::new(),
    }
}

fn courses(count: usize) -> Vec<Course> {
    (1..=count).map(|i| course(&i.to_string())).collect()
}

fn loaded(items: Vec<Course>, pagination: Pagination) -> State {
    let state = reduce(State::default(), Intent::FetchStarted { generation: 1 });
    reduce(
        state,
        Intent::FetchSucceeded {
            generation: 1,
            items,
            pagination,
        },
    )
}

#[test]
fn initial_state_is_idle_and_empty() {
    let state = State::default();
    assert_eq!(state.status, FetchStatus::Idle);
    assert!(state.items.is_empty());
    assert_eq!(state.pagination, Pagination::default());
    assert!(state.error.is_none());
}

#[test]
fn fetch_started_enters_loading_and_keeps_items() {
    let state = loaded(courses(2), Pagination::new(1, 10, 2));
    let state = reduce(state, Intent::FetchStarted { generation: 2 });

    assert_eq!(state.status, FetchStatus::Loading);
    assert!(state.is_loading());
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.generation, 2);
}

#[test]
fn fetch_succeeded_replaces_items_and_pagination() {
    let state = loaded(courses(3), Pagination::new(2, 3, 9));

    assert_eq!(state.status, FetchStatus::Loaded);
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.pagination.page, 2);
    assert_eq!(state.pagination.total_pages, 3);
}

#[test]
fn fetch_failed_clears_items_and_zeroes_totals() {
    let state = loaded(courses(5), Pagination::new(2, 5, 12));
    let state = reduce(state, Intent::FetchStarted { generation: 2 });
    let state = reduce(
        state,
        Intent::FetchFailed {
            generation: 2,
            message: Some("Conflict".to_string()),
        },
    );

    assert_eq!(state.status, FetchStatus::Error);
    assert!(state.items.is_empty());
    assert_eq!(state.error.as_deref(), Some("Conflict"));
    assert_eq!(state.pagination.page, 2);
    assert_eq!(state.pagination.page_size, 5);
    assert_eq!(state.pagination.total_items, 0);
    assert_eq!(state.pagination.total_pages, 0);
}

#[test]
fn stale_result_is_ignored() {
    let state = reduce(State::default(), Intent::FetchStarted { generation: 1 });
    let state = reduce(state, Intent::FetchStarted { generation: 2 });
    let state = reduce(
        state,
        Intent::FetchSucceeded {
            generation: 1,
            items: courses(4),
            pagination: Pagination::new(1, 10, 4),
        },
    );

    assert_eq!(state.status, FetchStatus::Loading);
    assert!(state.items.is_empty());
}

#[test]
fn result_outside_loading_is_ignored() {
    let state = loaded(courses(1), Pagination::new(1, 10, 1));
    let before = state.clone();
    let state = reduce(
        state,
        Intent::FetchFailed {
            generation: 1,
            message: None,
        },
    );

    assert_eq!(state, before);
}

#[test]
fn append_on_current_page_shows_item() {
    let state = loaded(courses(9), Pagination::new(1, 10, 9));
    let state = reduce(state, Intent::ItemAppended(course("new")));

    assert_eq!(state.items.len(), 10);
    assert_eq!(state.pagination.total_items, 10);
    assert_eq!(state.pagination.total_pages, 1);
}

#[test]
fn append_to_full_page_only_bumps_total() {
    let state = loaded(courses(10), Pagination::new(1, 10, 10));
    let state = reduce(state, Intent::ItemAppended(course("new")));

    assert_eq!(state.items.len(), 10);
    assert!(state.find("new").is_none());
    assert_eq!(state.pagination.total_items, 11);
    assert_eq!(state.pagination.total_pages, 2);
}

#[test]
fn append_on_last_partial_page_shows_item() {
    let state = loaded(courses(3), Pagination::new(3, 10, 23));
    let state = reduce(state, Intent::ItemAppended(course("new")));

    assert!(state.find("new").is_some());
    assert_eq!(state.pagination.total_items, 24);
}

#[test]
fn append_on_earlier_page_only_bumps_total() {
    let state = loaded(courses(10), Pagination::new(1, 10, 23));
    let state = reduce(state, Intent::ItemAppended(course("new")));

    assert!(state.find("new").is_none());
    assert_eq!(state.pagination.total_items, 24);
}

#[test]
fn append_to_empty_collection_shows_item() {
    let state = loaded(Vec::new(), Pagination::new(1, 10, 0));
    let state = reduce(state, Intent::ItemAppended(course("first")));

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.pagination.total_pages, 1);
}

#[test]
fn replace_patches_matching_item_only() {
    let state = loaded(courses(3), Pagination::new(1, 10, 3));
    let mut renamed = course("2");
    renamed.name = "Renamed".to_string();
    let state = reduce(state, Intent::ItemReplaced(renamed));

    assert_eq!(state.find("2").unwrap().name, "Renamed");
    assert_eq!(state.find("1").unwrap().name, "Course 1");

    let state = reduce(state, Intent::ItemReplaced(course("missing")));
    assert_eq!(state.items.len(), 3);
}

#[test]
fn remove_drops_item_and_decrements_total() {
    let state = loaded(courses(3), Pagination::new(1, 10, 3));
    let state = reduce(
        state,
        Intent::ItemRemoved {
            id: "2".to_string(),
        },
    );

    assert_eq!(state.items.len(), 2);
    assert!(state.find("2").is_none());
    assert_eq!(state.pagination.total_items, 2);
}
