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
mod test_templates {
    use crate::directive::Directive;
    use crate::template;
    use std::collections::HashMap;

    #[test]
    fn test_delete_assignment_template() {
        assert_eq!(
            template::delete_assignment("openai_api", "api_base"),
            "cs openai_api.api_base = :[x]"
        );
    }

    #[test]
    fn test_fragment_text() {
        assert_eq!(template::fragment("azure_endpoint"), "azure_endpoint = :[x]");
    }

    #[test]
    fn test_constructor_call_separators() {
        let fragments = vec![
            "a = :[x]".to_string(),
            "b = :[x]".to_string(),
            "c = :[x]".to_string(),
        ];
        let call = template::constructor_call("Client", &fragments);
        assert_eq!(call, "Client(a = :[x], b = :[x], c = :[x])");
        assert_eq!(call.matches(", ").count(), fragments.len() - 1);
    }

    #[test]
    fn test_constructor_call_empty() {
        assert_eq!(template::constructor_call("Client", &[]), "Client()");
    }

    #[test]
    fn test_instantiate_colon_and_at_forms() {
        let mut bindings = HashMap::new();
        bindings.insert("x".to_string(), "\"azure\"".to_string());

        assert_eq!(
            template::instantiate("api_type = :[x]", &bindings),
            "api_type = \"azure\""
        );
        assert_eq!(
            template::instantiate("api_type = @x", &bindings),
            "api_type = \"azure\""
        );
    }

    #[test]
    fn test_instantiate_leaves_unbound_holes() {
        let bindings = HashMap::new();
        assert_eq!(
            template::instantiate("api_type = :[x]", &bindings),
            "api_type = :[x]"
        );
    }

    #[test]
    fn test_directive_kinds() {
        let delete = Directive::delete("cs a.b = :[x]".to_string());
        assert!(delete.is_delete());
        assert!(!delete.is_append());
        assert_eq!(delete.to_string(), "delete: cs a.b = :[x]");

        let append = Directive::append("Client(b = :[x])".to_string());
        assert!(append.is_append());
        assert!(!append.is_delete());
        assert_eq!(append.to_string(), "append: Client(b = :[x])");
    }

    #[test]
    fn test_directive_json_shape() {
        let directive = Directive::delete("cs a.b = :[x]".to_string());
        let json = serde_json::to_string(&directive).unwrap();
        assert_eq!(
            json,
            r#"{"match_template":"cs a.b = :[x]","replace_template":""}"#
        );
    }
}
