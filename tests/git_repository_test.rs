use std::path::Path;

use git_autotag::config::{CliOverrides, Config, FileConfig, CONFIG_SECTION};
use git_autotag::domain::Tag;
use git_autotag::error::AutotagError;
use git_autotag::git::{Git2Repository, Repository};
use git_autotag::workflow;
use serial_test::serial;

/// Initialize a repository with one commit so HEAD exists and tags have a
/// target.
fn init_repo_with_commit(path: &Path) -> git2::Repository {
    let repo = git2::Repository::init(path).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    {
        let signature = repo.signature().unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &signature, &signature, "initial commit", &tree, &[])
            .unwrap();
    }
    repo
}

#[test]
fn test_list_tags_empty_repository() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Git2Repository::from_git2(init_repo_with_commit(dir.path()));
    assert!(repo.list_tags().unwrap().is_empty());
}

#[test]
fn test_create_and_list_tags() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Git2Repository::from_git2(init_repo_with_commit(dir.path()));

    repo.create_tag("0.1.0", "Release 0.1.0.").unwrap();
    repo.create_tag("0.2.0", "Release 0.2.0.").unwrap();

    let mut tags = repo.list_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["0.1.0", "0.2.0"]);
}

#[test]
fn test_created_tag_is_annotated_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let git_repo = init_repo_with_commit(dir.path());
    let repo = Git2Repository::from_git2(git_repo);

    repo.create_tag("0.1.0", "Release 0.1.0.").unwrap();

    let verification = git2::Repository::open(dir.path()).unwrap();
    let reference = verification.find_reference("refs/tags/0.1.0").unwrap();
    let tag_obj = reference.peel(git2::ObjectType::Tag).unwrap();
    let tag = tag_obj.as_tag().unwrap();
    assert!(tag.message().unwrap().contains("Release 0.1.0."));
}

#[test]
fn test_create_tag_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Git2Repository::from_git2(init_repo_with_commit(dir.path()));

    repo.create_tag("1.0.0", "Release 1.0.0.").unwrap();
    let err = repo.create_tag("1.0.0", "Release 1.0.0.").unwrap_err();
    assert!(matches!(err, AutotagError::TagAlreadyExists(_)));
}

#[test]
fn test_config_value_reads_repository_config() {
    let dir = tempfile::tempdir().unwrap();
    let git_repo = init_repo_with_commit(dir.path());
    git_repo
        .config()
        .unwrap()
        .set_str("autotag.step", "major")
        .unwrap();
    let repo = Git2Repository::from_git2(git_repo);

    assert_eq!(
        repo.config_value(CONFIG_SECTION, "step").unwrap(),
        Some("major".to_string())
    );
    assert_eq!(repo.config_value(CONFIG_SECTION, "remote_name").unwrap(), None);
}

#[test]
fn test_resolve_config_from_repository() {
    let dir = tempfile::tempdir().unwrap();
    let git_repo = init_repo_with_commit(dir.path());
    {
        let mut config = git_repo.config().unwrap();
        config.set_str("autotag.tagname_template", "V{major}.{minor}").unwrap();
        config.set_str("autotag.push_after_tagging", "yes").unwrap();
    }
    let repo = Git2Repository::from_git2(git_repo);

    let config =
        Config::resolve(&CliOverrides::default(), &repo, &FileConfig::default()).unwrap();
    assert_eq!(config.tagname_template.as_str(), "V{major}.{minor}");
    assert!(config.push_after_tagging);
}

#[test]
fn test_workflow_against_real_repository() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Git2Repository::from_git2(init_repo_with_commit(dir.path()));
    let config = Config::default();

    let first = workflow::run(&repo, &config, false).unwrap();
    assert_eq!(first.tag, "0.1.0");

    let second = workflow::run(&repo, &config, false).unwrap();
    assert_eq!(second.tag, "0.2.0");

    let mut tags = repo.list_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["0.1.0", "0.2.0"]);
}

#[test]
fn test_workflow_ignores_existing_foreign_tags() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Git2Repository::from_git2(init_repo_with_commit(dir.path()));
    repo.create_tag("foobar", "not a version").unwrap();
    repo.create_tag("1.0.0", "Release 1.0.0.").unwrap();

    let result = workflow::run(&repo, &Config::default(), false).unwrap();
    assert_eq!(result.tag, "1.1.0");
}

#[test]
fn test_create_through_tag_entity() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Git2Repository::from_git2(init_repo_with_commit(dir.path()));
    let config = Config::default();

    let name = Tag::from_parts(1, 2, 3).create(&repo, &config).unwrap();
    assert_eq!(name, "1.2.3");

    let err = Tag::from_parts(1, 2, 3).create(&repo, &config).unwrap_err();
    assert!(matches!(err, AutotagError::TagAlreadyExists(_)));
}

#[test]
#[serial]
fn test_discover_from_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    init_repo_with_commit(dir.path());
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(&nested).unwrap();
    let result = Git2Repository::discover();
    std::env::set_current_dir(original).unwrap();

    assert!(result.is_ok());
}
