use std::fs;
use std::path::Path;

use tempfile::TempDir;

use oldworld_ambitions::data::dataset::render_dataset;
use oldworld_ambitions::data::extract::{extract_dataset, ExtractError};
use oldworld_ambitions::data::validate::validate_dataset;
use oldworld_ambitions::viewer::availability::evaluate;
use oldworld_ambitions::viewer::filter::{run_query, FilterQuery};
use oldworld_ambitions::viewer::Selection;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).expect("fixture write should succeed");
}

/// A miniature game-data directory covering text chains, link markup,
/// scenario/disabled flags, tier fallbacks, filters and typed counts.
fn game_fixture() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let root = dir.path();

    write(
        root,
        "text-infos.xml",
        r#"<Root>
  <Entry><zType>TEXT_GOAL_SIX_CITIES</zType><en-US>Six Cities</en-US></Entry>
  <Entry><zType>TEXT_GOAL_LEGIONS</zType><en-US>Legions of link(NATION_ROME)</en-US></Entry>
  <Entry><zType>TEXT_GOAL_NATIONAL</zType><en-US>Eternal Glory</en-US></Entry>
  <Entry><zType>TEXT_GOAL_STOCKPILE</zType><en-US>TEXT_GOAL_STOCKPILE_REAL</en-US></Entry>
  <Entry><zType>TEXT_GOAL_STOCKPILE_REAL</zType><en-US>Full Cellars</en-US></Entry>
  <Entry><zType>TEXT_NATION_ROME</zType><en-US>Rome~Roman</en-US></Entry>
  <Entry><zType>TEXT_NATION_EGYPT</zType><en-US>Egypt</en-US></Entry>
  <Entry><zType>TEXT_FAMILYCLASS_SOLDIERS</zType><en-US>Soldiers</en-US></Entry>
  <Entry><zType>TEXT_YIELD_WINE</zType><en-US>Wine</en-US></Entry>
</Root>"#,
    );
    write(
        root,
        "text-infos-help.xml",
        r#"<Root>
  <Entry><zType>TEXT_GOALHELP_SIX_CITIES</zType><en-US>Control six cities at once</en-US></Entry>
</Root>"#,
    );
    write(
        root,
        "goal.xml",
        r#"<Root>
  <Entry></Entry>
  <Entry>
    <zType>GOAL_SIX_CITIES</zType>
    <Name>TEXT_GOAL_SIX_CITIES</Name>
    <HelpText>TEXT_GOALHELP_SIX_CITIES</HelpText>
    <iAmbitionClass>3</iAmbitionClass>
    <iMinTier>2</iMinTier>
    <iMaxTier>6</iMaxTier>
    <iCities>6</iCities>
  </Entry>
  <Entry><zType>GOAL_SCENARIO_ONLY</zType><bScenario>1</bScenario></Entry>
  <Entry><zType>GOAL_SWITCHED_OFF</zType><bDisabled>1</bDisabled></Entry>
  <Entry>
    <zType>GOAL_LEGIONS</zType>
    <Name>TEXT_GOAL_LEGIONS</Name>
    <iAmbitionClass>19</iAmbitionClass>
    <NationPrereq>NATION_ROME</NationPrereq>
    <aeFamilyClass><zValue>FAMILYCLASS_SOLDIERS</zValue></aeFamilyClass>
  </Entry>
  <Entry>
    <zType>GOAL_NATIONAL</zType>
    <Name>TEXT_GOAL_NATIONAL</Name>
    <iAmbitionClass>3</iAmbitionClass>
    <bVictoryEligible>1</bVictoryEligible>
    <iMinTier>10</iMinTier>
    <iMaxTier>10</iMaxTier>
  </Entry>
  <Entry><zType>GOAL_BAD_TIER</zType><iMinTier>8</iMinTier><iMaxTier>3</iMaxTier></Entry>
  <Entry>
    <zType>GOAL_STOCKPILE</zType>
    <Name>TEXT_GOAL_STOCKPILE</Name>
    <iAmbitionClass>6</iAmbitionClass>
    <iTier>4</iTier>
    <GameContentRequired>DLC_WONDERS</GameContentRequired>
    <aiYieldCount><Pair><zIndex>YIELD_WINE</zIndex><iValue>200</iValue></Pair></aiYieldCount>
    <aeTechsAcquired><zValue>TECH_FORESTRY</zValue></aeTechsAcquired>
  </Entry>
  <Entry><zType>GOAL_TO_BE_KING</zType><iAmbitionClass>21</iAmbitionClass></Entry>
</Root>"#,
    );
    write(
        root,
        "familyClass.xml",
        r#"<Root>
  <Entry></Entry>
  <Entry><zType>FAMILYCLASS_SOLDIERS</zType><Name>TEXT_FAMILYCLASS_SOLDIERS</Name></Entry>
</Root>"#,
    );
    write(
        root,
        "nation.xml",
        r#"<Root>
  <Entry></Entry>
  <Entry>
    <zType>NATION_ROME</zType>
    <Name>TEXT_NATION_ROME</Name>
    <GenderedName>TEXT_NATION_ROME</GenderedName>
  </Entry>
  <Entry>
    <zType>NATION_EGYPT</zType>
    <Name>TEXT_NATION_EGYPT</Name>
    <GenderedName>TEXT_NATION_EGYPT</GenderedName>
    <GameContentRequired>DLC_PHARAOHS</GameContentRequired>
  </Entry>
  <Entry><zType>NATION_RETIRED</zType><bDisabled>1</bDisabled></Entry>
</Root>"#,
    );
    write(
        root,
        "family.xml",
        r#"<Root>
  <Entry></Entry>
  <Entry>
    <zType>FAMILY_JULII</zType>
    <FamilyClass>FAMILYCLASS_SOLDIERS</FamilyClass>
    <abNation>
      <Pair><zIndex>NATION_ROME</zIndex><bValue>1</bValue></Pair>
      <Pair><zIndex>NATION_EGYPT</zIndex><bValue>0</bValue></Pair>
    </abNation>
  </Entry>
</Root>"#,
    );
    write(
        root,
        "yield.xml",
        r#"<Root>
  <Entry></Entry>
  <Entry><zType>YIELD_WINE</zType><Name>TEXT_YIELD_WINE</Name></Entry>
</Root>"#,
    );

    dir
}

#[test]
fn extracts_records_and_counts_every_exclusion() {
    let fixture = game_fixture();
    let (dataset, report) = extract_dataset(fixture.path()).expect("extraction should succeed");

    let ids: Vec<&str> = dataset.ambitions.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "GOAL_SIX_CITIES",
            "GOAL_LEGIONS",
            "GOAL_NATIONAL",
            "GOAL_STOCKPILE",
            "GOAL_TO_BE_KING"
        ],
        "declaration order preserved, excluded records absent"
    );
    assert_eq!(report.scenario_skipped, 1);
    assert_eq!(report.malformed_records, vec!["GOAL_BAD_TIER"]);
    // One disabled goal plus one disabled nation.
    assert_eq!(report.disabled_skipped, 2);
    assert_eq!(report.ambitions, 5);
}

#[test]
fn tier_invariant_holds_and_single_tier_supplies_both_bounds() {
    let fixture = game_fixture();
    let (dataset, _) = extract_dataset(fixture.path()).expect("extraction should succeed");

    for ambition in &dataset.ambitions {
        assert!(
            ambition.min_tier >= 1
                && ambition.min_tier <= ambition.max_tier
                && ambition.max_tier <= 10,
            "{} violates tier bounds",
            ambition.id
        );
    }
    let stockpile = dataset
        .ambitions
        .iter()
        .find(|a| a.id == "GOAL_STOCKPILE")
        .unwrap();
    assert_eq!((stockpile.min_tier, stockpile.max_tier), (4, 4));
    let defaulted = dataset
        .ambitions
        .iter()
        .find(|a| a.id == "GOAL_TO_BE_KING")
        .unwrap();
    assert_eq!((defaulted.min_tier, defaulted.max_tier), (1, 10));
}

#[test]
fn resolves_text_chains_links_and_help_text() {
    let fixture = game_fixture();
    let (dataset, _) = extract_dataset(fixture.path()).expect("extraction should succeed");

    let six = dataset
        .ambitions
        .iter()
        .find(|a| a.id == "GOAL_SIX_CITIES")
        .unwrap();
    assert_eq!(six.name, "Six Cities");
    assert_eq!(six.help_text, "Control six cities at once");
    assert_eq!(six.requirements.cities, Some(6));

    // link(NATION_ROME) resolves via the nation table, first tilde variant.
    let legions = dataset
        .ambitions
        .iter()
        .find(|a| a.id == "GOAL_LEGIONS")
        .unwrap();
    assert_eq!(legions.name, "Legions of Rome");

    // TEXT_GOAL_STOCKPILE -> TEXT_GOAL_STOCKPILE_REAL indirection.
    let stockpile = dataset
        .ambitions
        .iter()
        .find(|a| a.id == "GOAL_STOCKPILE")
        .unwrap();
    assert_eq!(stockpile.name, "Full Cellars");
}

#[test]
fn filters_requirements_and_event_sources_are_materialized() {
    let fixture = game_fixture();
    let (dataset, report) = extract_dataset(fixture.path()).expect("extraction should succeed");

    let legions = dataset
        .ambitions
        .iter()
        .find(|a| a.id == "GOAL_LEGIONS")
        .unwrap();
    assert_eq!(legions.filters.nation_prereq.as_deref(), Some("NATION_ROME"));
    assert_eq!(legions.filters.nation_prereq_name.as_deref(), Some("Rome"));
    assert_eq!(legions.filters.family_class_names, vec!["Soldiers"]);

    let stockpile = dataset
        .ambitions
        .iter()
        .find(|a| a.id == "GOAL_STOCKPILE")
        .unwrap();
    assert_eq!(stockpile.dlc.as_deref(), Some("DLC_WONDERS"));
    let wine = &stockpile.requirements.yield_stockpile[0];
    assert_eq!(wine.type_id, "YIELD_WINE");
    assert_eq!(wine.type_name, "Wine");
    assert_eq!(wine.value, 200);
    // tech.xml is absent: the id degrades to a prettified name and the miss
    // is counted, never dropped.
    assert_eq!(stockpile.requirements.techs, vec!["TECH_FORESTRY"]);
    assert_eq!(stockpile.requirements.tech_names, vec!["Forestry"]);
    assert!(report.crossref_misses >= 1);

    let king = dataset
        .ambitions
        .iter()
        .find(|a| a.id == "GOAL_TO_BE_KING")
        .unwrap();
    let source = king.event_source.as_ref().expect("event-only metadata");
    assert_eq!(source.event_name.as_deref(), Some("To Be A King/Queen"));
}

#[test]
fn nations_join_family_classes_and_drop_disabled_entries() {
    let fixture = game_fixture();
    let (dataset, _) = extract_dataset(fixture.path()).expect("extraction should succeed");

    assert_eq!(dataset.nations.len(), 2);
    assert!(!dataset.nations.contains_key("NATION_RETIRED"));

    let rome = &dataset.nations["NATION_ROME"];
    assert_eq!(rome.name, "Rome");
    assert_eq!(rome.family_classes, vec!["FAMILYCLASS_SOLDIERS"]);
    assert_eq!(rome.dlc, None);

    let egypt = &dataset.nations["NATION_EGYPT"];
    assert_eq!(egypt.dlc.as_deref(), Some("DLC_PHARAOHS"));
    assert!(egypt.family_classes.is_empty());

    assert_eq!(dataset.family_classes["FAMILYCLASS_SOLDIERS"].name, "Soldiers");
}

#[test]
fn rome_prerequisite_gates_availability_end_to_end() {
    let fixture = game_fixture();
    let (dataset, _) = extract_dataset(fixture.path()).expect("extraction should succeed");
    let legions = dataset
        .ambitions
        .iter()
        .find(|a| a.id == "GOAL_LEGIONS")
        .unwrap();

    let as_egypt = evaluate(legions, &Selection::with_nation("NATION_EGYPT"));
    assert!(!as_egypt.available);
    assert_eq!(as_egypt.reasons, vec!["Requires Rome"]);

    let as_rome = evaluate(legions, &Selection::with_nation("NATION_ROME"));
    assert!(as_rome.available);

    assert!(evaluate(legions, &Selection::default()).available);
}

#[test]
fn national_ambitions_partition_out_of_query_results() {
    let fixture = game_fixture();
    let (dataset, _) = extract_dataset(fixture.path()).expect("extraction should succeed");

    let result = run_query(&dataset, &Selection::default(), &FilterQuery::default());
    let national_ids: Vec<&str> = result.national.iter().map(|v| v.ambition.id.as_str()).collect();
    assert_eq!(national_ids, vec!["GOAL_NATIONAL"]);
    assert_eq!(result.regular_total, 4);
}

#[test]
fn extracted_dataset_passes_validation_without_errors() {
    let fixture = game_fixture();
    let (dataset, _) = extract_dataset(fixture.path()).expect("extraction should succeed");
    let report = validate_dataset(&dataset);
    assert!(!report.has_errors(), "diagnostics: {:?}", report.diagnostics);
}

#[test]
fn repeated_runs_render_byte_identical_output() {
    let fixture = game_fixture();
    let (first, _) = extract_dataset(fixture.path()).expect("extraction should succeed");
    let (second, _) = extract_dataset(fixture.path()).expect("extraction should succeed");
    assert_eq!(render_dataset(&first), render_dataset(&second));
}

#[test]
fn missing_input_directory_is_a_terminal_error() {
    let missing = Path::new("/nonexistent/oldworld-fixture");
    assert!(matches!(
        extract_dataset(missing),
        Err(ExtractError::MissingInput(_))
    ));
}

#[test]
fn zero_surviving_ambitions_fails_the_run() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    write(
        dir.path(),
        "goal.xml",
        "<Root><Entry></Entry>\
         <Entry><zType>GOAL_A</zType><bScenario>1</bScenario></Entry></Root>",
    );
    assert!(matches!(
        extract_dataset(dir.path()),
        Err(ExtractError::NoValidAmbitions)
    ));
}
