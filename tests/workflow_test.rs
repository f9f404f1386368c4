use git_autotag::config::Config;
use git_autotag::domain::{Step, Tag, TagTemplate};
use git_autotag::error::AutotagError;
use git_autotag::git::{MockRepository, Repository};
use git_autotag::workflow;

fn repo_with_tags(names: &[&str]) -> MockRepository {
    let mut repo = MockRepository::new();
    for name in names {
        repo.add_tag(*name);
    }
    repo
}

#[test]
fn test_collect_skips_and_sorts() {
    let repo = repo_with_tags(&["0.0.0", "0.0.1", "0.1.1", "0.0.2", "1.0.1", "1.0.0", "foobar"]);
    let template = TagTemplate::default();

    let tags = Tag::collect(&repo, &template, true, false).unwrap();
    let names: Vec<String> = tags.iter().map(|t| t.name(&template)).collect();
    assert_eq!(
        names,
        vec!["0.0.0", "0.0.1", "0.0.2", "0.1.1", "1.0.0", "1.0.1"]
    );
}

#[test]
fn test_collect_strict_raises_on_foreign_tag() {
    let repo = repo_with_tags(&["1.0.0", "foobar"]);
    let template = TagTemplate::default();

    let err = Tag::collect(&repo, &template, true, true).unwrap_err();
    assert!(matches!(err, AutotagError::CannotParseTag(_)));
    assert!(err.to_string().contains("foobar"));
}

#[test]
fn test_workflow_full_cycle() {
    let repo = repo_with_tags(&["0.0.0", "0.0.1", "0.1.1", "0.0.2", "1.0.1", "1.0.0"]);

    let result = workflow::run(&repo, &Config::default(), false).unwrap();
    assert_eq!(result.tag, "1.1.0");
    assert_eq!(result.message, "Release 1.1.0.");
    assert!(repo.list_tags().unwrap().contains(&"1.1.0".to_string()));
}

#[test]
fn test_workflow_consecutive_runs() {
    let repo = repo_with_tags(&[]);
    let mut config = Config::default();
    config.step = Step::Patch;

    for expected in ["0.0.1", "0.0.2", "0.0.3"] {
        let result = workflow::run(&repo, &config, false).unwrap();
        assert_eq!(result.tag, expected);
    }
}

#[test]
fn test_workflow_floor_feeds_first_tag() {
    let repo = repo_with_tags(&[]);
    let mut config = Config::default();
    config.step = Step::Major;
    config.minimum_version = Some(semver::Version::new(17, 2, 1));

    let result = workflow::run(&repo, &config, false).unwrap();
    assert_eq!(result.tag, "17.0.0");
}

#[test]
fn test_workflow_push_and_pull_flags() {
    let repo = repo_with_tags(&["3.0.0"]);
    let mut config = Config::default();
    config.pull_before_tagging = true;
    config.push_after_tagging = true;
    config.remote_name = "upstream".to_string();

    let result = workflow::run(&repo, &config, false).unwrap();
    assert_eq!(result.tag, "3.1.0");
    assert!(result.pushed);
    assert_eq!(repo.pulled_remotes(), vec!["upstream"]);
    assert_eq!(
        repo.pushed_tags(),
        vec![("upstream".to_string(), "3.1.0".to_string())]
    );
}

#[test]
fn test_workflow_existing_tag_aborts_without_push() {
    // A custom template that renders every version to the same name makes
    // the increment collide with the existing tag
    let repo = repo_with_tags(&["release"]);
    let mut config = Config::default();
    config.tagname_template = TagTemplate::new("release").unwrap();
    config.push_after_tagging = true;

    let err = workflow::run(&repo, &config, false).unwrap_err();
    assert!(matches!(err, AutotagError::TagAlreadyExists(_)));
    assert!(repo.pushed_tags().is_empty());
}

#[test]
fn test_workflow_partial_template() {
    let repo = repo_with_tags(&["V1.2", "V1.10", "V0.9"]);
    let mut config = Config::default();
    config.tagname_template = TagTemplate::new("V{major}.{minor}").unwrap();

    let result = workflow::run(&repo, &config, false).unwrap();
    // Numeric comparison, not lexicographic: V1.10 is the latest
    assert_eq!(result.tag, "V1.11");
}
