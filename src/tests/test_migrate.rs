// Copyright (C) 2024 Jelmer Vernooij <jelmer@samba.org>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[cfg(test)]
mod test_migrate_source {
    use crate::config::{ArgumentMapping, MigrationConfig};
    use crate::engine::RegexEngine;
    use crate::migrate::migrate_source;

    #[test]
    fn test_full_azure_migration() {
        let source = r#"import openai as openai_api

openai_api.api_type = "azure"
openai_api.api_key = os.environ["AZURE_OPENAI_API_KEY"]
openai_api.api_base = "https://example.openai.azure.com"
openai_api.api_version = "2023-05-15"

print("configured")
"#;
        let config = MigrationConfig::azure_openai();
        let result = migrate_source(source, &config, &RegexEngine::new()).unwrap();

        let expected = r#"import openai as openai_api

AzureOpenAI(api_type = "azure", api_key = os.environ["AZURE_OPENAI_API_KEY"], azure_endpoint = "https://example.openai.azure.com", api_version = "2023-05-15")

print("configured")
"#;
        assert_eq!(result, expected);
    }

    #[test]
    fn test_argument_order_follows_mapping_not_source() {
        // Assignments in reverse order in the file; the composed call
        // still lists arguments in mapping order
        let source = r#"openai_api.api_version = "2023-05-15"
openai_api.api_base = "https://example.openai.azure.com"
openai_api.api_key = "sk-123"
openai_api.api_type = "azure"
"#;
        let config = MigrationConfig::azure_openai();
        let result = migrate_source(source, &config, &RegexEngine::new()).unwrap();

        let expected = r#"AzureOpenAI(api_type = "azure", api_key = "sk-123", azure_endpoint = "https://example.openai.azure.com", api_version = "2023-05-15")
"#;
        assert_eq!(result, expected);
    }

    #[test]
    fn test_missing_assignments_are_skipped() {
        let source = r#"openai_api.api_key = "sk-123"
do_something()
"#;
        let config = MigrationConfig::azure_openai();
        let result = migrate_source(source, &config, &RegexEngine::new()).unwrap();

        let expected = r#"AzureOpenAI(api_key = "sk-123")
do_something()
"#;
        assert_eq!(result, expected);
    }

    #[test]
    fn test_unrelated_source_is_unchanged() {
        let source = r#"import requests

session = requests.Session()
session.headers["x"] = "y"
"#;
        let config = MigrationConfig::azure_openai();
        let result = migrate_source(source, &config, &RegexEngine::new()).unwrap();
        assert_eq!(result, source);
    }

    #[test]
    fn test_call_inserted_at_first_rewrite_site() {
        let source = r#"setup()
openai_api.api_type = "azure"
middle()
openai_api.api_key = "sk-123"
teardown()
"#;
        let config = MigrationConfig::azure_openai();
        let result = migrate_source(source, &config, &RegexEngine::new()).unwrap();

        let expected = r#"setup()
AzureOpenAI(api_type = "azure", api_key = "sk-123")
middle()
teardown()
"#;
        assert_eq!(result, expected);
    }

    #[test]
    fn test_indented_assignment_is_rewritten() {
        let source = r#"def configure():
    openai_api.api_key = key
"#;
        let config = MigrationConfig::azure_openai();
        let result = migrate_source(source, &config, &RegexEngine::new()).unwrap();

        let expected = r#"def configure():
    AzureOpenAI(api_key = key)
"#;
        assert_eq!(result, expected);
    }

    #[test]
    fn test_custom_migration_config() {
        let mapping = ArgumentMapping::from_pairs([
            ("host".to_string(), "endpoint".to_string()),
            ("token".to_string(), "api_token".to_string()),
        ])
        .unwrap();
        let config = MigrationConfig::new("settings.db", "DbClient", mapping).unwrap();

        let source = "settings.db.host = \"localhost\"\nsettings.db.token = secret\n";
        let result = migrate_source(source, &config, &RegexEngine::new()).unwrap();
        assert_eq!(
            result,
            "DbClient(endpoint = \"localhost\", api_token = secret)\n"
        );
    }
}
