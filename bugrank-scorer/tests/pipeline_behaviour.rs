//! Behavioural coverage for the end-to-end experience pipeline.

use std::cell::RefCell;

use bugrank_core::{
    Dataset, Selector, SourceError, TesterResult,
    test_support::{MemorySource, sample_source},
};
use bugrank_scorer::{Pipeline, PipelineError, PipelineRequest};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct PipelineWorld {
    source: RefCell<Option<MemorySource>>,
    request: RefCell<PipelineRequest>,
    outcome: RefCell<Option<Result<Vec<TesterResult>, PipelineError>>>,
}

impl PipelineWorld {
    fn ranking(&self) -> Vec<TesterResult> {
        match self.outcome.borrow().as_ref() {
            Some(Ok(ranked)) => ranked.clone(),
            Some(Err(err)) => panic!("pipeline should succeed, got {err}"),
            None => panic!("pipeline has not run"),
        }
    }
}

#[fixture]
fn world() -> PipelineWorld {
    PipelineWorld::default()
}

#[given("the sample tester datasets")]
fn sample_datasets(world: &PipelineWorld) {
    world.source.replace(Some(sample_source()));
}

#[given("the sample tester datasets without a bug header")]
fn headerless_bugs(world: &PipelineWorld) {
    world
        .source
        .replace(Some(sample_source().without_header(Dataset::Bugs)));
}

#[given("a device selector for iPhone 5")]
fn iphone_selector(world: &PipelineWorld) {
    world.request.borrow_mut().devices = Selector::case_folded(["iPhone 5"]);
}

#[given("no device selector")]
fn no_device_selector(world: &PipelineWorld) {
    world.request.borrow_mut().devices = Selector::All;
}

#[given("no country selector")]
fn no_country_selector(world: &PipelineWorld) {
    world.request.borrow_mut().countries = Selector::All;
}

#[given("an empty country selector")]
fn empty_country_selector(world: &PipelineWorld) {
    world.request.borrow_mut().countries = Selector::none();
}

#[when("I run the experience pipeline")]
fn run_pipeline(world: &PipelineWorld) {
    let borrowed = world.source.borrow();
    let source = borrowed
        .as_ref()
        .unwrap_or_else(|| panic!("datasets must be prepared"));
    let outcome = Pipeline::new(source).run(&world.request.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("the ranking is Ann Lee with 2 bugs")]
fn ann_only(world: &PipelineWorld) {
    assert_eq!(world.ranking(), vec![TesterResult::new("t1", "Ann Lee", 2)]);
}

#[then("the ranking is Bo Kim with 1 bug then Ann Lee with 2 bugs")]
fn bo_then_ann(world: &PipelineWorld) {
    assert_eq!(
        world.ranking(),
        vec![
            TesterResult::new("t2", "Bo Kim", 1),
            TesterResult::new("t1", "Ann Lee", 2),
        ]
    );
}

#[then("the ranking is empty")]
fn empty_ranking(world: &PipelineWorld) {
    assert!(world.ranking().is_empty());
}

#[then("the pipeline fails on the bugs dataset")]
fn fails_on_bugs(world: &PipelineWorld) {
    match world.outcome.borrow().as_ref() {
        Some(Err(PipelineError::Source(SourceError::MissingHeader { dataset, .. }))) => {
            assert_eq!(*dataset, Dataset::Bugs);
        }
        Some(Err(other)) => panic!("unexpected error {other}"),
        Some(Ok(ranked)) => panic!("expected failure, got {ranked:?}"),
        None => panic!("pipeline has not run"),
    }
}

#[scenario(path = "tests/features/pipeline.feature", index = 0)]
fn iphone_testers(world: PipelineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/pipeline.feature", index = 1)]
fn every_tester(world: PipelineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/pipeline.feature", index = 2)]
fn empty_countries(world: PipelineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/pipeline.feature", index = 3)]
fn headerless_bug_dataset(world: PipelineWorld) {
    let _ = world;
}
