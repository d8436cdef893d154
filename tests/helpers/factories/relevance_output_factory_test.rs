use std::fs;

use tempfile::tempdir;

use crate::test_helpers::factories::RelevanceOutputFactory;

#[test]
fn relevance_output_factory_writes_expected_defaults() {
    let dir = tempdir().unwrap();

    let path = RelevanceOutputFactory::new().write(dir.path(), "doc.csv");

    let content = fs::read_to_string(path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("pdf_name,kpi_id,paragraph,score"));
    assert_eq!(lines.clone().count(), 2);
}

#[test]
fn relevance_output_factory_chain_and_write_many() {
    let dir = tempdir().unwrap();

    let single = RelevanceOutputFactory::new()
        .with_header("a,b")
        .with_rows(&["1,2"])
        .write(dir.path(), "custom.csv");
    assert_eq!(fs::read_to_string(single).unwrap(), "a,b\n1,2\n");

    let many = RelevanceOutputFactory::new().write_many(dir.path(), 3);
    assert_eq!(many.len(), 3);
    assert!(many[0].ends_with("doc_0.csv"));
    assert!(many[2].ends_with("doc_2.csv"));
    let second = fs::read_to_string(&many[1]).unwrap();
    assert!(second.contains("doc_1.pdf,1,paragraph 1,0.5"));
}
