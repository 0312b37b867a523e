#![allow(missing_docs)]

use std::{fs, io::Write, path::Path};

use tempdir::TempDir;
use wordloom::{
    EmbeddingBuildOptions, build_embedding_path, io::tensor_io::load_embedding_tensor_path,
    write_embedding_artifacts,
};

const VECTORS: &str = "hello 0.1 0.2\n\
                       world 0.3 0.4\n\
                       <s> 0.0 0.0\n\
                       </s> 0.0 0.0\n\
                       . 0.5 0.5\n\
                       - 0.0 0.1\n";

fn write_file(
    dir: &TempDir,
    name: &str,
    contents: &str,
) -> String {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path.to_str().unwrap().to_owned()
}

#[test]
fn test_worked_scenario() {
    let dir = TempDir::new("pipeline_test").unwrap();
    let vectors = write_file(&dir, "vectors.txt", VECTORS);
    let vocab_file = write_file(&dir, "vocab.txt", "hello\nmissing_token\n");

    let (vocab, matrix) =
        build_embedding_path(&vectors, &[&vocab_file], &EmbeddingBuildOptions::default()).unwrap();

    let tokens: Vec<&str> = vocab.keys().map(String::as_str).collect();
    assert_eq!(
        tokens,
        vec!["<pad>", "<bos>", "<eos>", "<unk>", "hello", "world", "missing_token"]
    );
    assert_eq!(matrix.rows(), 7);
    assert_eq!(matrix.dim(), 2);
    assert_eq!(vocab.len(), matrix.rows());

    // every index unique and contiguous from 0
    for (position, (_token, &index)) in vocab.iter().enumerate() {
        assert_eq!(position, index);
    }

    // the <unk> row is the mean of all rows, taken while <unk> itself
    // was still the zero placeholder
    let rows: Vec<Vec<f32>> = (0..7).map(|i| matrix.row_f32(i)).collect();
    for column in 0..2 {
        let sum: f32 = rows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 3)
            .map(|(_, row)| row[column])
            .sum();
        let expected = sum / 7.0;
        assert!(
            (rows[3][column] - expected).abs() < 1e-3,
            "unk[{column}] = {} != {expected}",
            rows[3][column]
        );
    }

    // the synthesized row is a mean of real rows, not zeros
    assert!(rows[6].iter().any(|&v| v != 0.0));
}

#[test]
fn test_artifacts_are_deterministic() {
    let dir = TempDir::new("pipeline_test").unwrap();
    let vectors = write_file(&dir, "vectors.txt", VECTORS);
    let vocab_file = write_file(&dir, "vocab.txt", "hello\nmissing_token\n");
    let options = EmbeddingBuildOptions::default().with_seed(42);

    for run in ["first", "second"] {
        let (vocab, matrix) = build_embedding_path(&vectors, &[&vocab_file], &options).unwrap();
        let prefix = dir.path().join(run);
        write_embedding_artifacts(prefix.to_str().unwrap(), &vocab, &matrix).unwrap();
    }

    let tensor = |run: &str| fs::read(dir.path().join(format!("{run}.safetensors"))).unwrap();
    let index = |run: &str| fs::read(dir.path().join(format!("{run}.vocab.json"))).unwrap();

    assert_eq!(tensor("first"), tensor("second"));
    assert_eq!(index("first"), index("second"));
}

#[test]
fn test_artifact_contents() {
    let dir = TempDir::new("pipeline_test").unwrap();
    let vectors = write_file(&dir, "vectors.txt", VECTORS);
    let vocab_file = write_file(&dir, "vocab.txt", "hello\nmissing_token\n");

    let (vocab, matrix) =
        build_embedding_path(&vectors, &[&vocab_file], &EmbeddingBuildOptions::default()).unwrap();
    let prefix = dir.path().join("out");
    write_embedding_artifacts(prefix.to_str().unwrap(), &vocab, &matrix).unwrap();

    let (rows, dim, values) =
        load_embedding_tensor_path(dir.path().join("out.safetensors")).unwrap();
    assert_eq!((rows, dim), (7, 2));
    assert_eq!(values.len(), 14);

    let json = fs::read_to_string(dir.path().join("out.vocab.json")).unwrap();
    assert!(json.starts_with(r#"{"<pad>":0,"<bos>":1,"<eos>":2,"<unk>":3"#));
}

#[test]
fn test_target_size_is_exact_when_reachable() {
    let dir = TempDir::new("pipeline_test").unwrap();
    let vectors = write_file(
        &dir,
        "vectors.txt",
        "<s> 0.0\n</s> 0.0\na 1.0\nb 2.0\nc 3.0\nd 4.0\ne 5.0\n",
    );
    let vocab_file = write_file(&dir, "vocab.txt", "zzz\n");
    let options = EmbeddingBuildOptions::default().with_target_size(7);

    let (vocab, matrix) = build_embedding_path(&vectors, &[&vocab_file], &options).unwrap();

    // 4 special + 1 deferred + 2 admitted
    assert_eq!(vocab.len(), 7);
    assert_eq!(matrix.rows(), 7);
    let tokens: Vec<&str> = vocab.keys().map(String::as_str).collect();
    assert_eq!(
        tokens,
        vec!["<pad>", "<bos>", "<eos>", "<unk>", "a", "b", "zzz"]
    );
}

#[test]
fn test_short_pool_caps_below_target() {
    let dir = TempDir::new("pipeline_test").unwrap();
    let vectors = write_file(&dir, "vectors.txt", "<s> 0.0\n</s> 0.0\na 1.0\n");
    let options = EmbeddingBuildOptions::default().with_target_size(100);

    let (vocab, _matrix) =
        build_embedding_path(&vectors, &[] as &[&str], &options).unwrap();

    // only one qualifying token exists beyond the mandatory four
    assert_eq!(vocab.len(), 5);
}

#[test]
fn test_malformed_input_aborts_without_artifacts() {
    let dir = TempDir::new("pipeline_test").unwrap();
    let vectors = write_file(&dir, "vectors.txt", "hello 0.1 0.2\nworld 0.3\n");

    let result =
        build_embedding_path(&vectors, &[] as &[&str], &EmbeddingBuildOptions::default());

    assert!(result.is_err());
    assert!(!Path::new(&format!("{}.safetensors", dir.path().join("out").display())).exists());
    assert!(!Path::new(&format!("{}.vocab.json", dir.path().join("out").display())).exists());
}

#[test]
fn test_missing_boundary_tokens_abort() {
    let dir = TempDir::new("pipeline_test").unwrap();
    let vectors = write_file(&dir, "vectors.txt", "hello 0.1 0.2\nworld 0.3 0.4\n");

    let result =
        build_embedding_path(&vectors, &[] as &[&str], &EmbeddingBuildOptions::default());

    assert!(result.is_err());
}

#[test]
fn test_seed_changes_are_isolated_to_synthesis() {
    let dir = TempDir::new("pipeline_test").unwrap();
    let vectors = write_file(&dir, "vectors.txt", VECTORS);
    let vocab_file = write_file(&dir, "vocab.txt", "hello\nmissing_token\n");

    let (vocab_a, _) = build_embedding_path(
        &vectors,
        &[&vocab_file],
        &EmbeddingBuildOptions::default().with_seed(1),
    )
    .unwrap();
    let (vocab_b, _) = build_embedding_path(
        &vectors,
        &[&vocab_file],
        &EmbeddingBuildOptions::default().with_seed(2),
    )
    .unwrap();

    // the vocabulary never depends on the seed
    assert_eq!(vocab_a, vocab_b);
}
