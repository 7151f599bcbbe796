//! Whole-file scenarios over a generated root component.

use super::*;

const GENERATED_APP_COMPONENT: &str = r"import { Component } from '@angular/core';

@Component({
  selector: 'app-root',
  templateUrl: './app.component.html',
  styleUrls: ['./app.component.css']
})
export class AppComponent {
  title = 'generated-app';
}
";

#[test]
fn adds_option_and_extends_import() {
    let patched = apply_on_push(GENERATED_APP_COMPONENT);

    assert_eq!(
        patched,
        r"import { Component, ChangeDetectionStrategy } from '@angular/core';

@Component({
  selector: 'app-root',
  templateUrl: './app.component.html',
  styleUrls: ['./app.component.css'],
  changeDetection: ChangeDetectionStrategy.OnPush
})
export class AppComponent {
  title = 'generated-app';
}
"
    );
}

#[test]
fn new_property_and_import_are_appended_last() {
    let before_options = component_option_texts(GENERATED_APP_COMPONENT);
    let before_imports = core_import_texts(GENERATED_APP_COMPONENT);

    let patched = apply_on_push(GENERATED_APP_COMPONENT);
    let after_options = component_option_texts(&patched);
    let after_imports = core_import_texts(&patched);

    assert_eq!(after_options.len(), before_options.len() + 1);
    assert_eq!(
        after_options.last().map(String::as_str),
        Some("changeDetection: ChangeDetectionStrategy.OnPush")
    );
    // The pre-existing properties are untouched and still lead.
    assert_eq!(&after_options[..before_options.len()], &before_options[..]);

    assert_eq!(after_imports.len(), before_imports.len() + 1);
    assert_eq!(
        after_imports.last().map(String::as_str),
        Some("ChangeDetectionStrategy")
    );
}

#[test]
fn reapplying_appends_again() {
    // Deliberately not idempotent: the patch assumes a freshly generated
    // project and a second run duplicates both insertions.
    armature_log::test();
    let mut store = store_with_entry(GENERATED_APP_COMPONENT);
    let patch = DecoratorPatch::on_push(ENTRY);
    apply(&mut store, &patch).unwrap();
    apply(&mut store, &patch).unwrap();

    let twice = store.read_text(ENTRY_KEY).unwrap().unwrap();
    assert_eq!(twice.matches("changeDetection:").count(), 2);
    assert_eq!(core_import_texts(&twice).len(), 3);
    assert_eq!(
        component_option_texts(&twice).len(),
        component_option_texts(GENERATED_APP_COMPONENT).len() + 2
    );
}

#[test]
fn class_half_alone_leaves_import_bytes_unchanged() {
    let source = r"import { Component } from 'some-other-library';

@Component({
  selector: 'app-root'
})
export class AppComponent {}
";
    let patched = apply_on_push(source);

    // Import section byte-for-byte unchanged, class section patched.
    assert!(patched.starts_with("import { Component } from 'some-other-library';\n"));
    assert!(patched.contains(
        "  selector: 'app-root',\n  changeDetection: ChangeDetectionStrategy.OnPush\n"
    ));
}

#[test]
fn import_half_alone_works_without_any_class() {
    let source = r"import { Component } from '@angular/core';

export function bootstrap(): void {}
";
    let patched = apply_on_push(source);

    assert_eq!(
        patched,
        r"import { Component, ChangeDetectionStrategy } from '@angular/core';

export function bootstrap(): void {}
"
    );
}
