//! Integration tests for BCF archive import.
//!
//! These tests drive a real zip container through the full pipeline:
//! 1. ZipArchiveReader lists and opens entries
//! 2. QuickXmlMarkupParser extracts the topic markup
//! 3. ReconcileIssueHandler merges viewpoints, work item and comments
//! 4. ImportArchiveHandler saves every issue
//!
//! Collaborators are the in-memory adapters.

use std::io::{Cursor, Write};
use std::sync::Arc;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use bcf_import::adapters::memory::{
    InMemoryAttachmentSink, InMemoryIssueRepository, InMemoryMemberDirectory,
    InMemoryStatusCatalog, InMemoryWorkItems,
};
use bcf_import::adapters::{QuickXmlMarkupParser, ZipArchiveReader};
use bcf_import::application::{
    ImportArchiveCommand, ImportArchiveHandler, ImportReport, ReconcileIssueHandler,
    ReconcilePorts,
};
use bcf_import::config::ImportConfig;
use bcf_import::domain::bcf::{SyncFailure, TopicUuid};
use bcf_import::domain::foundation::{ErrorCode, ProjectId, StatusId, UserId};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TOPIC: &str = "3f2e8c1a-6a4b-4d57-9d0e-1c2b3a4d5e6f";
const OTHER_TOPIC: &str = "9b1c0d2e-1111-4a2b-8c3d-4e5f6a7b8c9d";
const PROJECT: u64 = 42;

const VIEWPOINT_XML: &[u8] = b"<?xml version=\"1.0\"?><VisualizationInfo Guid=\"v1\"/>";
const SNAPSHOT_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00];

fn markup(snapshot: bool) -> String {
    let snapshot = if snapshot {
        "<Snapshot>snapshot.png</Snapshot>"
    } else {
        ""
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Markup xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Header>
    <File IfcProject="0M6o7Znnv7hxsbWgeu7oQq" isExternal="false">
      <Filename>Clinic.ifc</Filename>
    </File>
  </Header>
  <Topic Guid="{TOPIC}" TopicType="Issue" TopicStatus="Open">
    <Title>Leak in roof</Title>
    <CreationDate>2019-02-14T09:20:00+01:00</CreationDate>
    <Description>Water on level 3 near the <![CDATA[north & east]]> gutter</Description>
  </Topic>
  <Comment Guid="c1">
    <Date>2019-02-14T09:31:00+01:00</Date>
    <Author>nomatch@example.com</Author>
    <Comment>Please check the flashing</Comment>
    <Viewpoint Guid="v1"/>
  </Comment>
  <Comment Guid="c2">
    <Date>2019-02-15T10:00:00+01:00</Date>
    <Author>anna@example.com</Author>
    <Comment>Fixed, see photo</Comment>
  </Comment>
  <Viewpoints Guid="v1">
    <Viewpoint>viewpoint.bcfv</Viewpoint>
    {snapshot}
  </Viewpoints>
</Markup>"#
    )
}

fn build_archive(entries: &[(String, Vec<u8>)]) -> ZipArchiveReader<Cursor<Vec<u8>>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = ZipWriter::new(&mut cursor);
        let options = SimpleFileOptions::default();
        for (name, bytes) in entries {
            writer.start_file(name.as_str(), options).unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap();
    }
    ZipArchiveReader::from_bytes(cursor.into_inner()).unwrap()
}

fn topic_archive(snapshot: bool) -> ZipArchiveReader<Cursor<Vec<u8>>> {
    let mut entries = vec![
        ("bcf.version".to_string(), b"<Version VersionId=\"2.1\"/>".to_vec()),
        (format!("{}/markup.bcf", TOPIC), markup(snapshot).into_bytes()),
        (format!("{}/viewpoint.bcfv", TOPIC), VIEWPOINT_XML.to_vec()),
    ];
    if snapshot {
        entries.push((format!("{}/snapshot.png", TOPIC), SNAPSHOT_PNG.to_vec()));
    }
    build_archive(&entries)
}

struct TestApp {
    issues: Arc<InMemoryIssueRepository>,
    work_items: Arc<InMemoryWorkItems>,
    attachments: Arc<InMemoryAttachmentSink>,
    statuses: Arc<InMemoryStatusCatalog>,
    handler: ImportArchiveHandler,
}

impl TestApp {
    fn new(members: InMemoryMemberDirectory) -> Self {
        Self::with_issues(members, Arc::new(InMemoryIssueRepository::new()))
    }

    /// Fresh collaborators over an existing issue store.
    fn with_issues(
        members: InMemoryMemberDirectory,
        issues: Arc<InMemoryIssueRepository>,
    ) -> Self {
        let work_items = Arc::new(InMemoryWorkItems::new());
        let attachments = Arc::new(InMemoryAttachmentSink::new());
        let statuses = Arc::new(InMemoryStatusCatalog::with_names(
            &[(1, "New"), (2, "Open"), (5, "Closed")],
            1,
        ));

        let reconciler = ReconcileIssueHandler::new(
            ReconcilePorts {
                parser: Arc::new(QuickXmlMarkupParser::new()),
                issues: issues.clone(),
                work_items: work_items.clone(),
                notes: work_items.clone(),
                members: Arc::new(members),
                attachments: attachments.clone(),
            },
            ImportConfig::default(),
        );
        let handler = ImportArchiveHandler::new(reconciler, issues.clone(), statuses.clone());

        Self {
            issues,
            work_items,
            attachments,
            statuses,
            handler,
        }
    }

    async fn import(&self, archive: &ZipArchiveReader<Cursor<Vec<u8>>>) -> ImportReport {
        self.handler
            .handle(
                ImportArchiveCommand {
                    project_id: ProjectId::new(PROJECT),
                    current_user: importer(),
                },
                archive,
            )
            .await
            .unwrap()
    }

    fn comment_notes(&self, text: &str) -> Vec<bcf_import::adapters::memory::RecordedNote> {
        self.work_items
            .notes()
            .into_iter()
            .filter(|note| note.text == text)
            .collect()
    }
}

fn importer() -> UserId {
    UserId::new("importer").unwrap()
}

fn anna() -> UserId {
    UserId::new("anna").unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn imports_topic_with_viewpoint_content_from_archive() {
    let app = TestApp::new(InMemoryMemberDirectory::new());
    let archive = topic_archive(false);

    let report = app.import(&archive).await;

    assert!(report.is_clean(), "unexpected failures: {:?}", report);
    assert_eq!(report.imported.len(), 1);
    let issue = app
        .issues
        .get(&TopicUuid::new(TOPIC).unwrap(), ProjectId::new(PROJECT))
        .unwrap();
    assert_eq!(issue.viewpoints().len(), 1);
    assert_eq!(issue.viewpoints()[0].uuid(), "v1");
    assert_eq!(issue.viewpoints()[0].content(), VIEWPOINT_XML);
    assert_eq!(issue.markup(), markup(false).as_bytes());
}

#[tokio::test]
async fn work_item_mirrors_topic_attributes() {
    let app = TestApp::new(InMemoryMemberDirectory::new());

    let report = app.import(&topic_archive(false)).await;

    let issue = &report.imported[0].issue;
    let work_items = app.work_items.work_items();
    assert_eq!(work_items.len(), 1);
    let created = &work_items[0];
    assert_eq!(created.params.project_id, ProjectId::new(PROJECT));
    assert_eq!(created.params.type_name, "Issue");
    assert_eq!(created.params.attributes.subject, "Leak in roof");
    assert_eq!(
        created.params.attributes.description,
        "Water on level 3 near the north & east gutter"
    );
    assert_eq!(created.params.attributes.status_id, StatusId::new(2));
    assert_eq!(created.author, importer());
    assert_eq!(issue.work_item_id(), Some(created.id));
    assert_eq!(app.comment_notes("(Updated in BCF import)").len(), 1);
}

#[tokio::test]
async fn viewpoint_without_snapshot_stores_no_attachment() {
    let app = TestApp::new(InMemoryMemberDirectory::new());

    let report = app.import(&topic_archive(false)).await;

    assert!(app.attachments.stored().is_empty());
    assert!(report.imported[0].issue.viewpoints()[0].snapshot().is_none());
}

#[tokio::test]
async fn snapshot_is_stored_under_its_filename() {
    let app = TestApp::new(InMemoryMemberDirectory::new());

    let report = app.import(&topic_archive(true)).await;

    let stored = app.attachments.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].filename, "snapshot.png");
    assert_eq!(stored[0].bytes, SNAPSHOT_PNG);
    let snapshot = report.imported[0].issue.viewpoints()[0].snapshot().unwrap();
    assert_eq!(snapshot.filename, "snapshot.png");
    assert_eq!(snapshot.attachment_id, stored[0].id);
}

#[tokio::test]
async fn unknown_author_note_is_written_by_importer() {
    let members = InMemoryMemberDirectory::new().with_member(
        ProjectId::new(PROJECT),
        anna(),
        "anna@example.com",
        true,
    );
    let app = TestApp::new(members);

    let report = app.import(&topic_archive(false)).await;

    let unknown = app.comment_notes("Please check the flashing");
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].author, importer());

    let known = app.comment_notes("Fixed, see photo");
    assert_eq!(known.len(), 1);
    assert_eq!(known[0].author, anna());

    let issue = &report.imported[0].issue;
    assert_eq!(issue.comment("c1").unwrap().journal_id(), Some(unknown[0].id));
    assert_eq!(issue.comment("c2").unwrap().journal_id(), Some(known[0].id));
}

#[tokio::test]
async fn member_of_other_project_does_not_author_notes() {
    let members = InMemoryMemberDirectory::new().with_member(
        ProjectId::new(PROJECT + 1),
        anna(),
        "anna@example.com",
        true,
    );
    let app = TestApp::new(members);

    app.import(&topic_archive(false)).await;

    let notes = app.comment_notes("Fixed, see photo");
    assert_eq!(notes[0].author, importer());
}

#[tokio::test]
async fn reimport_is_idempotent() {
    let app = TestApp::new(InMemoryMemberDirectory::new());
    let archive = topic_archive(true);

    app.import(&archive).await;
    let report = app.import(&archive).await;

    assert!(report.is_clean());
    assert_eq!(app.issues.count(), 1);
    let issue = &report.imported[0].issue;
    assert_eq!(issue.viewpoints().len(), 1);
    assert_eq!(issue.comments().len(), 2);

    // one work item, updated on the second run
    assert_eq!(app.work_items.create_calls(), 1);
    assert_eq!(app.work_items.update_calls(), 1);
    assert_eq!(app.work_items.work_items()[0].revisions, 2);

    // snapshots and comments are not written twice
    assert_eq!(app.attachments.stored().len(), 1);
    assert_eq!(app.comment_notes("Please check the flashing").len(), 1);
    assert_eq!(app.comment_notes("Fixed, see photo").len(), 1);
    // each run leaves its own import note
    assert_eq!(app.comment_notes("(Updated in BCF import)").len(), 2);
}

#[tokio::test]
async fn failed_work_item_creation_keeps_merged_content() {
    let app = TestApp::new(InMemoryMemberDirectory::new());
    app.work_items.fail_writes_with("Type is not enabled in this project");

    let report = app.import(&topic_archive(false)).await;

    assert!(report.failed.is_empty());
    let imported = &report.imported[0];
    assert!(imported.issue.work_item_id().is_none());
    assert_eq!(imported.issue.viewpoints().len(), 1);
    assert_eq!(imported.issue.comments().len(), 2);
    assert!(imported
        .issue
        .comments()
        .iter()
        .all(|comment| comment.journal_id().is_none()));
    assert!(app.work_items.notes().is_empty());
    assert_eq!(
        imported.sync_failures,
        vec![SyncFailure::WorkItem {
            topic: TopicUuid::new(TOPIC).unwrap(),
            messages: "Type is not enabled in this project".to_string(),
        }]
    );

    // the issue is persisted so a later run can finish the sync
    assert_eq!(app.issues.count(), 1);
}

#[tokio::test]
async fn comments_merged_during_failed_run_are_not_posted_later() {
    let first = TestApp::new(InMemoryMemberDirectory::new());
    let archive = topic_archive(false);
    first.work_items.fail_writes_with("Service unavailable");
    first.import(&archive).await;

    let second = TestApp::with_issues(InMemoryMemberDirectory::new(), first.issues.clone());
    let report = second.import(&archive).await;

    let issue = &report.imported[0].issue;
    assert!(issue.work_item_id().is_some());
    assert_eq!(second.work_items.create_calls(), 1);
    // comments are matched by uuid and already present locally
    assert!(second.comment_notes("Please check the flashing").is_empty());
    assert!(issue.comment("c1").unwrap().journal_id().is_none());
    assert_eq!(second.comment_notes("(Updated in BCF import)").len(), 1);
}

#[tokio::test]
async fn status_catalog_is_read_once_per_archive() {
    let app = TestApp::new(InMemoryMemberDirectory::new());
    let second = markup(false).replace(TOPIC, OTHER_TOPIC);
    let archive = build_archive(&[
        (format!("{}/markup.bcf", TOPIC), markup(false).into_bytes()),
        (format!("{}/viewpoint.bcfv", TOPIC), VIEWPOINT_XML.to_vec()),
        (format!("{}/markup.bcf", OTHER_TOPIC), second.into_bytes()),
        (format!("{}/viewpoint.bcfv", OTHER_TOPIC), VIEWPOINT_XML.to_vec()),
    ]);

    let report = app.import(&archive).await;

    assert_eq!(report.imported.len(), 2);
    assert_eq!(app.statuses.list_calls(), 1);
}

#[tokio::test]
async fn topic_with_missing_viewpoint_file_is_reported_and_skipped() {
    let app = TestApp::new(InMemoryMemberDirectory::new());
    let archive = build_archive(&[
        (format!("{}/markup.bcf", TOPIC), markup(false).into_bytes()),
        (
            format!("{}/markup.bcf", OTHER_TOPIC),
            markup(false).replace(TOPIC, OTHER_TOPIC).into_bytes(),
        ),
        (format!("{}/viewpoint.bcfv", OTHER_TOPIC), VIEWPOINT_XML.to_vec()),
    ]);

    let report = app.import(&archive).await;

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].entry_path, format!("{}/markup.bcf", TOPIC));
    assert_eq!(report.failed[0].code, ErrorCode::ArchiveEntryMissing);
    assert_eq!(report.imported.len(), 1);
    assert_eq!(app.work_items.create_calls(), 1);
    assert!(app
        .issues
        .get(&TopicUuid::new(TOPIC).unwrap(), ProjectId::new(PROJECT))
        .is_none());
}

#[tokio::test]
async fn failing_member_directory_does_not_duplicate_work_items_on_reimport() {
    let members = InMemoryMemberDirectory::new();
    members.fail_lookups_with("connection reset");
    let app = TestApp::new(members);
    let archive = topic_archive(false);

    let first = app.import(&archive).await;
    let second = app.import(&archive).await;

    assert!(first.failed.is_empty());
    assert!(second.failed.is_empty());
    assert_eq!(app.issues.count(), 1);
    assert_eq!(app.work_items.create_calls(), 1);
    assert_eq!(app.work_items.update_calls(), 1);

    // both comments posted once, attributed to the importer
    let flashing = app.comment_notes("Please check the flashing");
    assert_eq!(flashing.len(), 1);
    assert_eq!(flashing[0].author, importer());
    assert_eq!(app.comment_notes("Fixed, see photo").len(), 1);
}

#[tokio::test]
async fn topic_failing_after_snapshot_leaves_no_attachment() {
    let app = TestApp::new(InMemoryMemberDirectory::new());
    let broken = markup(true).replace(
        "</Markup>",
        "  <Viewpoints Guid=\"v2\"><Viewpoint>gone.bcfv</Viewpoint></Viewpoints>\n</Markup>",
    );
    let archive = build_archive(&[
        (format!("{}/markup.bcf", TOPIC), broken.into_bytes()),
        (format!("{}/viewpoint.bcfv", TOPIC), VIEWPOINT_XML.to_vec()),
        (format!("{}/snapshot.png", TOPIC), SNAPSHOT_PNG.to_vec()),
    ]);

    let first = app.import(&archive).await;
    let second = app.import(&archive).await;

    assert_eq!(first.failed[0].code, ErrorCode::ArchiveEntryMissing);
    assert_eq!(second.failed[0].code, ErrorCode::ArchiveEntryMissing);
    assert!(app.attachments.stored().is_empty());
    assert_eq!(app.issues.count(), 0);
    assert_eq!(app.work_items.create_calls(), 0);
}

