// Unit tests for the emitter: items are rendered with prettyplease and checked as text.

use super::*;
use crate::{
    api::record::SourceLocation,
    naming::NamingRules,
    GenError,
};

fn location(file: &str, line: usize) -> SourceLocation {
    SourceLocation {
        file: file.to_string(),
        line,
    }
}

fn render(items: Vec<syn::Item>) -> String {
    prettyplease::unparse(&syn::File {
        shebang: None,
        attrs: vec![],
        items,
    })
}

fn function(api: &str, c_name: &str, return_type: &str, args: &str) -> FunctionDecl {
    FunctionDecl {
        api: api.to_string(),
        c_name: c_name.to_string(),
        return_type_raw: return_type.to_string(),
        arg_list_raw: args.to_string(),
        location: location(&format!("{api}.h"), 42),
    }
}

fn state_enum() -> EnumDecl {
    EnumDecl {
        name: "state".to_string(),
        values: vec!["PN_STATE_UNINIT".to_string(), "PN_STATE_ACTIVE".to_string()],
        location: location("types.h", 7),
    }
}

fn enum_decl(name: &str, values: &[&str]) -> EnumDecl {
    EnumDecl {
        name: name.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
        location: location("types.h", 12),
    }
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in:\n{haystack}"))
}

#[test]
fn test_enum_block() {
    let config = GeneratorConfig::proton("/inc");
    let out = render(Emitter::new(&config).enum_block(&state_enum()).unwrap());

    assert!(out.contains("pub struct State(pub proton_sys::pn_state_t);"), "{out}");
    assert!(out.contains("#[repr(transparent)]"), "{out}");
    let uninit = position(&out, "pub const StateUninit: State = State(proton_sys::PN_STATE_UNINIT);");
    let active = position(&out, "pub const StateActive: State = State(proton_sys::PN_STATE_ACTIVE);");
    assert!(uninit < active);
    assert!(out.contains("proton_sys::PN_STATE_UNINIT => \"StateUninit\","), "{out}");
    assert!(out.contains("proton_sys::PN_STATE_ACTIVE => \"StateActive\","), "{out}");
    assert!(out.contains("_ => \"unknown\""), "{out}");
    assert!(out.contains("impl ::std::fmt::Display for State"), "{out}");
    assert!(out.contains("types.h:7"), "{out}");
}

#[test]
fn test_enum_block_uses_configured_paths() {
    let config = GeneratorConfig::builder("/inc").sys_path("crate::sys").build();
    let out = render(Emitter::new(&config).enum_block(&state_enum()).unwrap());
    assert!(out.contains("pub struct State(pub crate::sys::pn_state_t);"), "{out}");
    assert!(!out.contains("proton_sys"), "{out}");
}

#[test]
fn test_event_kinds_exclusions() {
    let config = GeneratorConfig::proton("/inc");
    let decl = EnumDecl {
        name: "event_type".to_string(),
        values: [
            "PN_EVENT_NONE",
            "PN_REACTOR_INIT",
            "PN_CONNECTION_INIT",
            "PN_TIMER_TASK",
            "PN_LINK_FLOW",
            "PN_SELECTABLE_INIT",
        ]
        .map(String::from)
        .to_vec(),
        location: location("event.h", 3),
    };
    let emitter = Emitter::new(&config);
    let kinds = emitter.event_kinds(&decl);
    assert_eq!(
        kinds,
        [
            EventKind {
                native_constant: "PN_CONNECTION_INIT".to_string(),
                wrapper_name: "ConnectionInit".to_string(),
            },
            EventKind {
                native_constant: "PN_LINK_FLOW".to_string(),
                wrapper_name: "LinkFlow".to_string(),
            },
        ]
    );

    let out = render(emitter.event_kind_block(&decl).unwrap());
    assert!(out.contains("pub struct EventType(pub proton_sys::pn_event_type_t);"), "{out}");
    let init = position(
        &out,
        "pub const EConnectionInit: EventType = EventType(proton_sys::PN_CONNECTION_INIT);",
    );
    let flow = position(&out, "pub const ELinkFlow: EventType = EventType(proton_sys::PN_LINK_FLOW);");
    assert!(init < flow);
    assert!(out.contains("proton_sys::PN_LINK_FLOW => \"LinkFlow\","), "{out}");
    assert!(out.contains("_ => \"Unknown\""), "{out}");
    for excluded in ["EVENT_NONE", "REACTOR", "TIMER", "SELECTABLE"] {
        assert!(!out.contains(excluded), "{excluded} leaked into:\n{out}");
    }
}

#[test]
fn test_enumerator_starting_with_digit_fails() {
    let config = GeneratorConfig::proton("/inc");
    let decl = enum_decl("mode", &["PN_ONEWAY", "PN_2WAY"]);
    let err = Emitter::new(&config).enum_block(&decl).unwrap_err();
    match &err {
        GenError::InvalidEnumerator {
            enumerator,
            name,
            location,
        } => {
            assert_eq!(enumerator, "PN_2WAY");
            assert_eq!(name, "2way");
            assert_eq!(location.to_string(), "types.h:12");
        }
        other => panic!("expected InvalidEnumerator, got {other:?}"),
    }
    assert!(err.to_string().contains("PN_2WAY"), "{err}");
}

#[test]
fn test_bare_prefix_enumerator_fails() {
    let config = GeneratorConfig::proton("/inc");
    let emitter = Emitter::new(&config);
    let decl = enum_decl("mode", &["PN_"]);
    assert!(matches!(
        emitter.enum_block(&decl),
        Err(GenError::InvalidEnumerator { ref enumerator, ref name, .. })
            if enumerator == "PN_" && name.is_empty()
    ));

    let events = enum_decl("event_type", &["PN_LINK_FLOW", "PN_"]);
    assert!(matches!(
        emitter.event_kind_block(&events),
        Err(GenError::InvalidEnumerator { .. })
    ));
}

#[test]
fn test_duplicate_constants_fail() {
    let config = GeneratorConfig::proton("/inc");
    let emitter = Emitter::new(&config);
    let decl = enum_decl("mode", &["PN_A_B", "PN_C", "PN_A__B"]);
    match emitter.enum_block(&decl) {
        Err(GenError::DuplicateConstant {
            type_name,
            constant,
            first,
            second,
            location,
        }) => {
            assert_eq!(type_name, "Mode");
            assert_eq!(constant, "AB");
            assert_eq!(first, "PN_A_B");
            assert_eq!(second, "PN_A__B");
            assert_eq!(location.to_string(), "types.h:12");
        }
        other => panic!("expected DuplicateConstant, got {other:?}"),
    }

    let events = enum_decl("event_type", &["PN_LINK_FLOW", "PN_LINK__FLOW"]);
    match emitter.event_kind_block(&events) {
        Err(GenError::DuplicateConstant { constant, .. }) => assert_eq!(constant, "ELinkFlow"),
        other => panic!("expected DuplicateConstant, got {other:?}"),
    }
}

#[test]
fn test_wrapper_struct_and_builtins() {
    let config = GeneratorConfig::proton("/inc");
    let out = render(Emitter::new(&config).wrapper_block("link", &[]).unwrap());
    assert!(out.contains("/// Wrapper for declarations in link.h"), "{out}");
    assert!(out.contains("pub struct Link {"), "{out}");
    assert!(out.contains("pn: *mut proton_sys::pn_link_t,"), "{out}");
    assert!(out.contains("pub unsafe fn from_raw(pn: *mut proton_sys::pn_link_t) -> Self"), "{out}");
    assert!(out.contains("pub fn as_ptr(&self) -> *mut proton_sys::pn_link_t"), "{out}");
    assert!(out.contains("pub fn is_nil(&self) -> bool"), "{out}");
}

#[test]
fn test_override_and_conversion() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [function("link", "get_drain", "bool", "")];
    let out = render(Emitter::new(&config).wrapper_block("link", &functions).unwrap());
    assert!(out.contains("pub fn is_drain(&self) -> bool {"), "{out}");
    assert!(out.contains("proton_sys::pn_link_get_drain(self.pn)"), "{out}");
    assert!(!out.contains("fn drain("), "{out}");
}

#[test]
fn test_default_rule_strips_get() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [
        function("link", "get_credit", "int", ""),
        function("link", "remote_snd_settle_mode", "pn_snd_settle_mode_t", ""),
        function("link", "session", "pn_session_t *", ""),
    ];
    let out = render(Emitter::new(&config).wrapper_block("link", &functions).unwrap());
    assert!(out.contains("pub fn credit(&self) -> i32 {"), "{out}");
    assert!(out.contains("proton_sys::pn_link_get_credit(self.pn) as i32"), "{out}");
    assert!(out.contains("pub fn remote_snd_settle_mode(&self) -> SndSettleMode {"), "{out}");
    assert!(
        out.contains("SndSettleMode(proton_sys::pn_link_remote_snd_settle_mode(self.pn))"),
        "{out}"
    );
    assert!(out.contains("pub fn session(&self) -> Session {"), "{out}");
    assert!(out.contains("Session {"), "{out}");
}

#[test]
fn test_string_argument_is_staged_before_call() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [function("link", "set_name", "void", "const char *name")];
    let out = render(Emitter::new(&config).wrapper_block("link", &functions).unwrap());
    assert!(out.contains("pub fn set_name(&self, name: &str) {"), "{out}");
    let staged = position(&out, "let name_c = crate::internal::to_cstring(name);");
    let call = position(&out, "proton_sys::pn_link_set_name(self.pn, name_c.as_ptr() as _)");
    assert!(staged < call);
}

#[test]
fn test_string_and_error_returns() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [
        function("link", "name", "const char *", ""),
        function("connection", "error", "pn_error_t *", ""),
    ];
    let emitter = Emitter::new(&config);
    let out = render(emitter.wrapper_block("link", &functions[..1]).unwrap());
    assert!(out.contains("pub fn name(&self) -> ::std::string::String {"), "{out}");
    assert!(out.contains("crate::internal::from_c_str(proton_sys::pn_link_name(self.pn))"), "{out}");

    let out = render(emitter.wrapper_block("connection", &functions[1..]).unwrap());
    assert!(
        out.contains("pub fn error(&self) -> ::std::option::Option<crate::internal::Error> {"),
        "{out}"
    );
    assert!(out.contains("crate::internal::pn_error(proton_sys::pn_connection_error(self.pn))"), "{out}");
}

#[test]
fn test_durations_and_handles_as_arguments() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [
        function("terminus", "set_timeout", "int", "pn_seconds_t timeout"),
        function("terminus", "copy", "int", "pn_terminus_t *src"),
    ];
    let out = render(Emitter::new(&config).wrapper_block("terminus", &functions).unwrap());
    assert!(
        out.contains("pub fn set_timeout(&self, timeout: ::std::time::Duration) -> i32 {"),
        "{out}"
    );
    assert!(out.contains("timeout.as_secs() as _"), "{out}");
    assert!(out.contains("pub fn copy(&self, src: Terminus) -> i32 {"), "{out}");
    assert!(out.contains("proton_sys::pn_terminus_copy(self.pn, src.pn)"), "{out}");
}

#[test]
fn test_staged_local_does_not_shadow_parameter() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [function("link", "set_name", "void", "const char *name, int name_c")];
    let out = render(Emitter::new(&config).wrapper_block("link", &functions).unwrap());
    assert!(out.contains("pub fn set_name(&self, name: &str, name_c: i32) {"), "{out}");
    let staged = position(&out, "let name_c_ = crate::internal::to_cstring(name);");
    let call = position(
        &out,
        "proton_sys::pn_link_set_name(self.pn, name_c_.as_ptr() as _, name_c as _)",
    );
    assert!(staged < call);
    assert!(!out.contains("let name_c ="), "{out}");
}

#[test]
fn test_raw_pointers_pass_through() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [
        function("connection", "set_handle", "void", "void *handle"),
        function("connection", "handle", "void *", ""),
    ];
    let out = render(Emitter::new(&config).wrapper_block("connection", &functions).unwrap());
    assert!(
        out.contains("pub fn set_handle(&self, handle: *mut ::std::os::raw::c_void) {"),
        "{out}"
    );
    assert!(out.contains("proton_sys::pn_connection_set_handle(self.pn, handle)"), "{out}");
    assert!(out.contains("pub fn handle(&self) -> *mut ::std::os::raw::c_void {"), "{out}");
    assert!(out.contains("proton_sys::pn_connection_handle(self.pn)"), "{out}");
    assert!(!out.contains("pn_connection_handle(self.pn) as"), "{out}");
}

#[test]
fn test_millisecond_durations() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [
        function("link", "set_wait", "void", "pn_millis_t wait"),
        function("link", "get_wait", "pn_millis_t", ""),
    ];
    let out = render(Emitter::new(&config).wrapper_block("link", &functions).unwrap());
    assert!(out.contains("pub fn set_wait(&self, wait: ::std::time::Duration) {"), "{out}");
    assert!(out.contains("proton_sys::pn_link_set_wait(self.pn, wait.as_millis() as _)"), "{out}");
    assert!(out.contains("pub fn wait(&self) -> ::std::time::Duration {"), "{out}");
    assert!(out.contains("::std::time::Duration::from_millis("), "{out}");
    assert!(out.contains("proton_sys::pn_link_get_wait(self.pn) as u64"), "{out}");
}

#[test]
fn test_crossed_integer_widths() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [
        function("link", "set_max_frame", "void", "uint32_t size, uint16_t channel"),
        function("link", "max_frame", "uint32_t", ""),
        function("link", "channel", "uint16_t", ""),
    ];
    let out = render(Emitter::new(&config).wrapper_block("link", &functions).unwrap());
    assert!(out.contains("pub fn set_max_frame(&self, size: u16, channel: u32) {"), "{out}");
    assert!(
        out.contains("proton_sys::pn_link_set_max_frame(self.pn, size as _, channel as _)"),
        "{out}"
    );
    assert!(out.contains("pub fn max_frame(&self) -> u16 {"), "{out}");
    assert!(out.contains("proton_sys::pn_link_max_frame(self.pn) as u16"), "{out}");
    assert!(out.contains("pub fn channel(&self) -> u32 {"), "{out}");
    assert!(out.contains("proton_sys::pn_link_channel(self.pn) as u32"), "{out}");
}

#[test]
fn test_skip_precedence() {
    let naming = NamingRules::builder()
        .skip("drain")
        .rename("link", "get_drain", "IsDrain")
        .build();
    let config = GeneratorConfig::builder("/inc").naming(naming).build();
    let functions = [
        function("link", "get_drain", "bool", ""),
        function("link", "is_sender", "bool", ""),
    ];
    let out = render(Emitter::new(&config).wrapper_block("link", &functions).unwrap());
    assert!(!out.contains("drain"), "{out}");
    assert!(out.contains("pub fn is_sender(&self) -> bool {"), "{out}");
}

#[test]
fn test_skipped_functions_are_not_type_mapped() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [function("link", "attachments", "pn_record_t **", "struct foo bar")];
    assert!(Emitter::new(&config).wrapper_block("link", &functions).is_ok());
}

#[test]
fn test_keyword_method_names_are_escaped() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [function("terminus", "get_type", "pn_terminus_type_t", "")];
    let out = render(Emitter::new(&config).wrapper_block("terminus", &functions).unwrap());
    assert!(out.contains("pub fn type_(&self) -> TerminusType {"), "{out}");
}

#[test]
fn test_unknown_return_type_fails_with_context() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [
        function("link", "credit", "int", ""),
        function("link", "ratio", "float", ""),
    ];
    let err = Emitter::new(&config).wrapper_block("link", &functions).unwrap_err();
    match &err {
        GenError::InFunction {
            function,
            location,
            source,
        } => {
            assert_eq!(function, "pn_link_ratio");
            assert_eq!(location.to_string(), "link.h:42");
            assert!(matches!(**source, GenError::UnknownType { ref ctype } if ctype == "float"));
        }
        other => panic!("expected InFunction, got {other:?}"),
    }
    assert!(err.to_string().contains("\"float\""), "{err}");
}

#[test]
fn test_unknown_argument_type_fails() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [function("link", "set_ratio", "void", "double ratio")];
    let err = Emitter::new(&config).wrapper_block("link", &functions).unwrap_err();
    assert!(err.to_string().contains("\"double\""), "{err}");
}

#[test]
fn test_duplicate_methods_fail() {
    let config = GeneratorConfig::proton("/inc");
    let functions = [
        function("link", "credit", "int", ""),
        function("link", "get_credit", "int", ""),
    ];
    match Emitter::new(&config).wrapper_block("link", &functions) {
        Err(GenError::DuplicateMethod {
            method,
            first,
            second,
            ..
        }) => {
            assert_eq!(method, "credit");
            assert_eq!(first, "pn_link_credit");
            assert_eq!(second, "pn_link_get_credit");
        }
        other => panic!("expected DuplicateMethod, got {other:?}"),
    }

    let builtin = [function("link", "is_nil", "bool", "")];
    assert!(matches!(
        Emitter::new(&config).wrapper_block("link", &builtin),
        Err(GenError::DuplicateMethod { .. })
    ));
}
