//! False-positive behavior of the signature index under sparse and saturated
//! signatures.

use std::collections::HashSet;

use bitsig_index::SignatureIndex;

struct Corpus {
    index: SignatureIndex,
    documents: Vec<HashSet<u32>>,
}

fn build_corpus(
    rng: &mut fastrand::Rng,
    index: SignatureIndex,
    doc_count: usize,
    terms_per_doc: usize,
    term_range: std::ops::Range<u32>,
) -> Corpus {
    let mut index = index;
    let mut documents = Vec::with_capacity(doc_count);
    for _ in 0..doc_count {
        let terms = (0..terms_per_doc)
            .map(|_| rng.u32(term_range.clone()))
            .collect::<Vec<_>>();
        index.add_document(&terms);
        documents.push(terms.into_iter().collect());
    }
    Corpus { index, documents }
}

/// Fraction of (query, document) pairs reported as hits without the document
/// containing all query terms.
fn observed_false_positive_rate(corpus: &Corpus, queries: &[Vec<u32>]) -> f64 {
    let mut false_positives = 0usize;
    for query in queries {
        for doc in corpus.index.query(query) {
            let terms = &corpus.documents[doc.as_u64() as usize];
            if !query.iter().all(|t| terms.contains(t)) {
                false_positives += 1;
            }
        }
    }
    false_positives as f64 / (queries.len() * corpus.documents.len()) as f64
}

#[test]
fn test_sparse_signatures_rarely_collide() {
    let mut rng = fastrand::Rng::with_seed(5150);
    let index = SignatureIndex::with_widths(2048, 8192, 4).unwrap();
    let corpus = build_corpus(&mut rng, index, 2000, 10, 0..1_000_000);

    let stats = corpus.index.stats();
    assert!(stats.block_fill_ratio <= 40.0 / 2048.0);
    assert!(stats.block_fill_ratio > 0.015);
    assert!(stats.estimated_false_positive_rate(1) < 1e-5);

    // Terms outside the inserted range are absent from every document.
    let queries = (0..500)
        .map(|_| vec![rng.u32(2_000_000..3_000_000)])
        .collect::<Vec<_>>();
    assert!(observed_false_positive_rate(&corpus, &queries) < 1e-3);
}

#[test]
fn test_saturated_signatures_produce_candidates() {
    let mut rng = fastrand::Rng::with_seed(8086);
    let index = SignatureIndex::with_widths(64, 64, 4).unwrap();
    let corpus = build_corpus(&mut rng, index, 500, 20, 0..100_000);

    let stats = corpus.index.stats();
    assert!(stats.block_fill_ratio > 0.5);
    assert!(stats.estimated_false_positive_rate(1) > 0.05);

    let queries = (0..200)
        .map(|_| vec![rng.u32(200_000..300_000)])
        .collect::<Vec<_>>();
    assert!(observed_false_positive_rate(&corpus, &queries) > 0.05);

    // Saturation never hides a real match.
    for (id, terms) in corpus.documents.iter().enumerate() {
        let term = *terms.iter().next().unwrap();
        assert!(
            corpus
                .index
                .query(&[term])
                .iter()
                .any(|doc| doc.as_u64() == id as u64)
        );
    }
}

#[test]
fn test_more_terms_narrow_the_candidates() {
    let mut rng = fastrand::Rng::with_seed(1999);
    let index = SignatureIndex::with_widths(128, 512, 2).unwrap();
    let corpus = build_corpus(&mut rng, index, 1000, 12, 0..50_000);

    for _ in 0..100 {
        let a = rng.u32(60_000..70_000);
        let b = rng.u32(60_000..70_000);
        let single = corpus.index.query(&[a]);
        let pair = corpus.index.query(&[a, b]);
        let single = single.into_iter().collect::<HashSet<_>>();
        assert!(pair.iter().all(|doc| single.contains(doc)));
    }
}
