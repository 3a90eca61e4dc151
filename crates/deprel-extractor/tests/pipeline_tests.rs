//! Pipeline integration tests
//!
//! Runs the full annotate -> table -> extract flow against a corpus-backed
//! annotator loaded from CoNLL text.

use deprel_core::{AnnotatorSession, DeprelError};
use deprel_extractor::{
    extract_core, find_entity_collocations, CoreSummary, DependencyTable, RelationPipeline,
    WordPair,
};
use deprel_parser::{AnnotationParser, ConllParser, CorpusAnnotator};

/// 菜料十足，很新鲜，清淡又不乏味道。 / 我们推荐凤爪。 / 猫喜欢鱼。
const CORPUS: &str = "\
1\t菜料\t_\tn\tn\t_\t2\tSBV
2\t十足\t_\ta\ta\t_\t0\tHED
3\t，\t_\twp\twp\t_\t2\tWP
4\t很\t_\td\td\t_\t5\tADV
5\t新鲜\t_\ta\ta\t_\t2\tCOO
6\t，\t_\twp\twp\t_\t2\tWP
7\t清淡\t_\ta\ta\t_\t2\tCOO
8\t又\t_\td\td\t_\t9\tADV
9\t不乏\t_\tv\tv\t_\t7\tCOO
10\t味道\t_\tn\tn\t_\t9\tVOB
11\t。\t_\twp\twp\t_\t2\tWP

1\t我们\t_\tr\tr\t_\t2\tSBV
2\t推荐\t_\tv\tv\t_\t0\tHED
3\t凤爪\t_\tn\tn\t_\t2\tVOB
4\t。\t_\twp\twp\t_\t2\tWP

1\t猫\t_\tn\tn\t_\t2\tSBV
2\t喜欢\t_\tv\tv\t_\t0\tHED
3\t鱼\t_\tn\tn\t_\t2\tVOB
4\t。\t_\twp\twp\t_\t2\tWP
";

fn session() -> AnnotatorSession<CorpusAnnotator> {
    let annotations = ConllParser.parse_str(CORPUS).unwrap();
    AnnotatorSession::open(CorpusAnnotator::new(annotations))
}

#[test]
fn test_extract_relations_for_coordinated_sentence() {
    let session = session();
    let relations = RelationPipeline::new()
        .extract_relations(session.annotator(), "菜料十足，很新鲜，清淡又不乏味道。")
        .unwrap();

    assert_eq!(
        relations.core,
        CoreSummary::SubjectPredicate(vec!["菜料十足".to_string()])
    );
    // COO present, so SBV pairs are reported
    assert_eq!(
        relations.collocations.subject_predicate,
        vec![WordPair::new("菜料", "十足")]
    );
    // 又 is a stop word
    assert_eq!(
        relations.collocations.modifiers,
        vec![WordPair::new("很", "新鲜")]
    );
    assert_eq!(
        relations.coordinated_pairs,
        vec![
            WordPair::new("新鲜", "十足"),
            WordPair::new("清淡", "十足"),
            WordPair::new("不乏", "清淡"),
        ]
    );
    assert_eq!(
        relations.entity_collocations,
        vec!["菜料十足", "不乏味道"]
    );
}

#[test]
fn test_extract_paragraph_in_order() {
    let session = session();
    let paragraph = "我们推荐凤爪。猫喜欢鱼。";

    let parallel = RelationPipeline::new()
        .extract_paragraph(session.annotator(), paragraph)
        .unwrap();
    let serial = RelationPipeline::new()
        .with_parallel(false)
        .extract_paragraph(session.annotator(), paragraph)
        .unwrap();

    assert_eq!(parallel, serial);
    assert_eq!(parallel.len(), 2);
    assert_eq!(parallel[0].sentence, "我们推荐凤爪。");
    assert_eq!(parallel[0].core, CoreSummary::Triple("我们推荐凤爪".to_string()));
    assert_eq!(parallel[1].core, CoreSummary::Triple("猫喜欢鱼".to_string()));

    session.close().unwrap();
}

#[test]
fn test_paragraph_without_splitting_is_one_sentence() {
    let session = session();
    let relations = RelationPipeline::new()
        .with_sentence_splitting(false)
        .extract_paragraph(session.annotator(), " 猫喜欢鱼。 ")
        .unwrap();

    assert_eq!(relations.len(), 1);
    assert_eq!(relations[0].sentence, "猫喜欢鱼。");
}

#[test]
fn test_unknown_sentence_fails_whole_paragraph() {
    let session = session();
    let err = RelationPipeline::new()
        .extract_paragraph(session.annotator(), "猫喜欢鱼。狗追猫。")
        .unwrap_err();
    assert!(matches!(err, DeprelError::NotFound(_)));
}

#[test]
fn test_extractors_run_independently_on_shared_table() {
    let annotations = ConllParser.parse_str(CORPUS).unwrap();
    let table = DependencyTable::from_annotation(&annotations[2]);

    assert_eq!(extract_core(&table), CoreSummary::Triple("猫喜欢鱼".to_string()));
    assert_eq!(find_entity_collocations(&table), vec!["猫喜欢", "喜欢鱼"]);
    // The table is untouched by extraction
    assert_eq!(table, DependencyTable::from_annotation(&annotations[2]));
}

#[test]
fn test_pos_lookup_for_place_names() {
    let content = "1\t北京\t_\tns\tns\t_\t2\tSBV\n\
                   2\t是\t_\tv\tv\t_\t0\tHED\n\
                   3\t首都\t_\tn\tn\t_\t2\tVOB\n";
    let annotations = ConllParser.parse_str(content).unwrap();
    let table = DependencyTable::from_annotation(&annotations[0]);

    assert_eq!(table.words_with_pos("ns"), vec!["北京"]);
}
