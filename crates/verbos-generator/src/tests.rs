//! Integration tests for the generation pipeline

#[cfg(test)]
mod tests {
    use crate::{
        BatchDriver, BatchObserver, GenerationInputs, GeneratorConfig, GeneratorError, Progress,
        SilentObserver,
    };
    use std::fs;
    use tempfile::TempDir;
    use verbos_domain::{Item, ItemOutcome, ItemReport};
    use verbos_llm::{LlmError, MockProvider};

    const SCHEMA: &str = r##"type: object
required: [infinitivo, gerundio, participio-pasado, meaning, presente-indicativo]
additionalProperties: false
properties:
  infinitivo: { type: string, minLength: 1 }
  gerundio: { type: string }
  participio-pasado: { type: string }
  meaning: { type: string }
  presente-indicativo: { $ref: "#/definitions/pronouns" }
definitions:
  pronouns:
    type: object
    required: [yo, tu, ud]
    properties:
      yo: { type: string }
      tu: { type: string }
      ud: { type: string }
"##;

    const HABLAR: &str = r#"infinitivo: hablar
gerundio: hablando
participio-pasado: hablado
meaning: to speak
presente-indicativo:
  yo: hablo
  tu: hablas
  ud: habla
"#;

    const COMER: &str = r#"infinitivo: comer
gerundio: comiendo
participio-pasado: comido
meaning: to eat
presente-indicativo:
  yo: como
  tu: comes
  ud: come
"#;

    const COMER_NO_INFINITIVO: &str = r#"gerundio: comiendo
participio-pasado: comido
meaning: to eat
presente-indicativo:
  yo: como
  tu: comes
  ud: come
"#;

    struct Workspace {
        _dir: TempDir,
        config: GeneratorConfig,
    }

    fn workspace() -> Workspace {
        let dir = TempDir::new().unwrap();
        let schema_path = dir.path().join("verb-schema.yml");
        fs::write(&schema_path, SCHEMA).unwrap();
        let output_dir = dir.path().join("verbs");
        fs::create_dir(&output_dir).unwrap();
        fs::write(output_dir.join("hablar.yml"), HABLAR).unwrap();

        let config = GeneratorConfig {
            output_dir,
            schema_path,
            ..GeneratorConfig::default()
        };
        Workspace { _dir: dir, config }
    }

    fn items(names: &[&str]) -> Vec<Item> {
        names.iter().map(|n| Item::new(n).unwrap()).collect()
    }

    #[derive(Default)]
    struct Recorder {
        reports: Vec<(Progress, ItemReport)>,
        prompts: Vec<(Item, String)>,
        affected: Vec<Item>,
    }

    impl BatchObserver for Recorder {
        fn on_report(&mut self, progress: Progress, report: &ItemReport) {
            self.reports.push((progress, report.clone()));
        }

        fn on_prompt(&mut self, item: &Item, prompt: &str) {
            self.prompts.push((item.clone(), prompt.to_string()));
        }

        fn on_affected(&mut self, item: &Item) {
            self.affected.push(item.clone());
        }
    }

    #[test]
    fn test_missing_field_is_corrected() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let client = MockProvider::with_responses([COMER_NO_INFINITIVO, COMER]);

        let summary = BatchDriver::new(&inputs, &store).run(&client, &items(&["comer"]), &mut SilentObserver);

        assert_eq!(summary.count(ItemOutcome::Corrected), 1);
        assert_eq!(client.call_count(), 2);
        assert_eq!(store.read(&Item::new("comer").unwrap()).unwrap(), COMER);

        let correction = &client.prompts()[1];
        assert!(correction.contains("'infinitivo' is a required property"));
        assert!(correction.starts_with(client.prompts()[0].trim_end()));
    }

    #[test]
    fn test_existing_artifact_is_skipped_without_calls() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let client = MockProvider::new(COMER);

        let summary = BatchDriver::new(&inputs, &store).run(&client, &items(&["hablar"]), &mut SilentObserver);

        assert_eq!(summary.count(ItemOutcome::Skipped), 1);
        assert_eq!(summary.completion_calls(), 0);
        assert_eq!(client.call_count(), 0);
        assert_eq!(store.read(&Item::new("hablar").unwrap()).unwrap(), HABLAR);
    }

    #[test]
    fn test_force_regenerates_existing() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let replacement = HABLAR.replace("to speak", "to talk");
        let client = MockProvider::new(replacement.clone());

        let summary = BatchDriver::new(&inputs, &store)
            .with_force(true)
            .run(&client, &items(&["hablar"]), &mut SilentObserver);

        assert_eq!(summary.count(ItemOutcome::Created), 1);
        assert_eq!(client.call_count(), 1);
        assert_eq!(store.read(&Item::new("hablar").unwrap()).unwrap(), replacement);
    }

    #[test]
    fn test_transport_failure_does_not_abort_batch() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let client = MockProvider::new(COMER);
        client.push_error(LlmError::Communication("timed out".to_string()));

        let mut recorder = Recorder::default();
        let summary = BatchDriver::new(&inputs, &store).run(&client, &items(&["vivir", "comer"]), &mut recorder);

        assert_eq!(summary.reports[0].outcome, ItemOutcome::Failed);
        assert_eq!(summary.reports[0].completion_calls, 1);
        assert!(!store.exists(&Item::new("vivir").unwrap()));
        assert_eq!(summary.reports[1].outcome, ItemOutcome::Created);
        assert_eq!(client.call_count(), 2);

        let positions: Vec<_> = recorder.reports.iter().map(|(p, _)| p.position).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_prompt_only_has_no_side_effects() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let before: Vec<_> = fs::read_dir(store.dir()).unwrap().collect();

        let mut recorder = Recorder::default();
        let emitted = BatchDriver::new(&inputs, &store)
            .emit_prompts(&items(&["comer", "vivir", "hablar"]), &mut recorder)
            .unwrap();

        assert_eq!(emitted, 3);
        assert_eq!(recorder.prompts.len(), 3);
        assert!(recorder.prompts[2].1.contains("\"hablar\""));
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), before.len());
    }

    #[test]
    fn test_affected_lists_only_missing() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let input = items(&["hablar", "comer"]);

        let mut recorder = Recorder::default();
        let affected = BatchDriver::new(&inputs, &store).affected(&input, &mut recorder);
        assert_eq!(affected, items(&["comer"]));
        assert_eq!(recorder.affected, items(&["comer"]));

        let forced = BatchDriver::new(&inputs, &store)
            .with_force(true)
            .affected(&input, &mut SilentObserver);
        assert_eq!(forced, input);
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let batch = items(&["comer"]);

        let client = MockProvider::new(COMER);
        let first = BatchDriver::new(&inputs, &store).run(&client, &batch, &mut SilentObserver);
        assert_eq!(first.count(ItemOutcome::Created), 1);

        let rerun = MockProvider::new(COMER);
        let second = BatchDriver::new(&inputs, &store).run(&rerun, &batch, &mut SilentObserver);
        assert_eq!(second.count(ItemOutcome::Skipped), 1);
        assert_eq!(rerun.call_count(), 0);
    }

    #[test]
    fn test_never_more_than_two_calls_per_item() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let client = MockProvider::new("not: [valid");

        let summary = BatchDriver::new(&inputs, &store).run(&client, &items(&["comer", "vivir", "ir"]), &mut SilentObserver);

        assert_eq!(summary.count(ItemOutcome::Failed), 3);
        assert!(summary.reports.iter().all(|r| r.completion_calls == 2));
        assert_eq!(client.call_count(), 6);
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_fenced_reply_is_accepted() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let client = MockProvider::new(format!("```yaml\n{}```", COMER));

        let summary = BatchDriver::new(&inputs, &store).run(&client, &items(&["comer"]), &mut SilentObserver);

        assert_eq!(summary.count(ItemOutcome::Created), 1);
        assert!(!store.read(&Item::new("comer").unwrap()).unwrap().contains("```"));
    }

    #[test]
    fn test_reply_with_document_markers_is_accepted() {
        let ws = workspace();
        let store = ws.config.artifact_store();
        let inputs = GenerationInputs::load(&ws.config, &store).unwrap();
        let client = MockProvider::new(format!("---\n{}---\n", COMER));

        let summary = BatchDriver::new(&inputs, &store).run(&client, &items(&["comer"]), &mut SilentObserver);

        assert_eq!(summary.count(ItemOutcome::Created), 1);
        assert_eq!(client.call_count(), 1);
        assert!(!store.read(&Item::new("comer").unwrap()).unwrap().contains("---"));
    }

    #[test]
    fn test_missing_inputs_are_fatal() {
        let ws = workspace();
        fs::remove_file(ws.config.output_dir.join("hablar.yml")).unwrap();
        let result = GenerationInputs::load(&ws.config, &ws.config.artifact_store());
        assert!(matches!(result, Err(GeneratorError::MissingExample(_))));
    }
}
