//! Recoverable and fatal edge cases of the patch operation.

use super::*;
use crate::PatchError;
use armature_vfs::StoreError;

#[test]
fn bare_decorator_skips_class_edit_but_patches_import() {
    let source = r"import { Component } from '@angular/core';

@Component
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert_eq!(
        patched,
        r"import { Component, ChangeDetectionStrategy } from '@angular/core';

@Component
export class AppComponent {}
"
    );
}

#[test]
fn invocation_without_argument_skips_class_edit() {
    let source = r"import { Component } from '@angular/core';

@Component()
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert!(patched.contains("@Component()\n"));
    assert!(patched.contains("import { Component, ChangeDetectionStrategy }"));
}

#[test]
fn non_object_argument_skips_class_edit() {
    let source = r"import { Component } from '@angular/core';

@Component('app-root')
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert!(patched.contains("@Component('app-root')\n"));
    assert!(patched.contains("import { Component, ChangeDetectionStrategy }"));
}

#[test]
fn member_expression_decorator_is_skipped() {
    let source = r"import { Component } from '@angular/core';
import * as ng from '@angular/core';

@ng.Component({ selector: 'app-root' })
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert!(patched.contains("@ng.Component({ selector: 'app-root' })\n"));
    assert!(patched.contains("import { Component, ChangeDetectionStrategy }"));
}

#[test]
fn empty_options_object_gets_sole_property() {
    let source = r"import { Component } from '@angular/core';

@Component({})
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert!(
        patched.contains("@Component({ changeDetection: ChangeDetectionStrategy.OnPush })"),
        "sole-element anchor not applied:\n{patched}"
    );
}

#[test]
fn empty_named_import_list_gets_sole_symbol() {
    let source = r"import {} from '@angular/core';

@Component({ selector: 'app-root' })
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert!(patched.contains("import {ChangeDetectionStrategy} from '@angular/core';"));
    assert!(patched.contains(
        "@Component({ selector: 'app-root',\n  changeDetection: ChangeDetectionStrategy.OnPush })"
    ));
}

#[test]
fn default_import_is_left_alone() {
    let source = r"import core from '@angular/core';

@Component({ selector: 'app-root' })
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert!(patched.contains("import core from '@angular/core';"));
    assert!(patched.contains("changeDetection: ChangeDetectionStrategy.OnPush"));
}

#[test]
fn unrelated_module_import_is_left_alone() {
    let source = r"import { Component } from 'react';

@Component({ selector: 'app-root' })
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert!(patched.contains("import { Component } from 'react';"));
    assert!(patched.contains("changeDetection: ChangeDetectionStrategy.OnPush"));
}

#[test]
fn trailing_comma_in_options_object_is_preserved() {
    let source = r"import { Component } from '@angular/core';

@Component({
  selector: 'app-root',
})
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert!(patched.contains(
        "  selector: 'app-root',\n  changeDetection: ChangeDetectionStrategy.OnPush,\n})"
    ));
}

#[test]
fn first_class_with_matching_decorator_wins() {
    let source = r"import { Component } from '@angular/core';

@Component({ selector: 'one' })
class First {}

@Component({ selector: 'two' })
class Second {}
";
    let patched = apply_on_push(source);

    assert!(patched.contains(
        "@Component({ selector: 'one',\n  changeDetection: ChangeDetectionStrategy.OnPush })"
    ));
    assert!(patched.contains("@Component({ selector: 'two' })"));
}

#[test]
fn undecorated_leading_class_does_not_shadow_the_target() {
    let source = r"import { Component } from '@angular/core';

class Helper {}

@Component({ selector: 'app-root' })
export class AppComponent {}
";
    let patched = apply_on_push(source);

    assert!(patched.contains(
        "@Component({ selector: 'app-root',\n  changeDetection: ChangeDetectionStrategy.OnPush })"
    ));
}

#[test]
fn tsx_entry_is_parsed_with_the_tsx_grammar() {
    armature_log::test();
    let mut store = MemoryStore::new();
    store.write(
        "src/app/app.component.tsx",
        r"import { Component } from '@angular/core';

@Component({ selector: 'app-root' })
export class AppComponent {}
",
    );

    apply(
        &mut store,
        &DecoratorPatch::on_push("/src/app/app.component.tsx"),
    )
    .unwrap();

    let patched = store
        .read_text("src/app/app.component.tsx")
        .unwrap()
        .unwrap();
    assert!(patched.contains("import { Component, ChangeDetectionStrategy }"));
}

#[test]
fn missing_entry_file_is_fatal() {
    armature_log::test();
    let mut store = MemoryStore::new();

    let err = apply(&mut store, &DecoratorPatch::on_push(ENTRY)).unwrap_err();
    assert!(matches!(err, PatchError::MissingEntryFile { .. }));
}

#[test]
fn undecodable_entry_file_is_fatal() {
    armature_log::test();
    let mut store = MemoryStore::new();
    store.write(ENTRY_KEY, vec![0xff, 0xfe, 0x00]);

    let err = apply(&mut store, &DecoratorPatch::on_push(ENTRY)).unwrap_err();
    assert!(matches!(
        err,
        PatchError::Store {
            source: StoreError::NotUtf8 { .. },
            ..
        }
    ));
}
