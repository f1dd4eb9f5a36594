/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Runs an `async fn` test on a current-thread Tokio runtime whose clock starts paused.
///
/// With the clock paused, `tokio::time::sleep` inside the test auto-advances virtual
/// time to the next pending timer, so a stopwatch ticking every 10 ms can be observed
/// for "55 ms" without waiting and without scheduling jitter.
///
/// Panics raised on spawned tasks (which Tokio would otherwise swallow) are recorded
/// by a panic hook and re-raised once the test body returns.
#[proc_macro_attribute]
pub fn acton_stopwatch_test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let vis = &input.vis;
    let sig = &input.sig;
    let body = &input.block;
    let attrs = &input.attrs;
    let name = &sig.ident;
    let inputs = &sig.inputs;
    let output = &sig.output;

    let async_name = syn::Ident::new(&format!("__{}_async", name), name.span());

    let output = quote! {
        #[test]
        #(#attrs)*
        #vis fn #name() {
            use std::panic;
            use std::sync::atomic::{AtomicBool, Ordering};
            use std::sync::Arc;
            use ::acton_stopwatch_test::parking_lot::Mutex;

            #[derive(Default)]
            struct PanicRecord {
                occurred: AtomicBool,
                message: Mutex<Option<String>>,
                location: Mutex<Option<String>>,
            }

            let record = Arc::new(PanicRecord::default());
            let hook_record = Arc::clone(&record);

            let orig_hook = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                hook_record.occurred.store(true, Ordering::SeqCst);
                let message = info
                    .payload()
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| info.payload().downcast_ref::<String>().cloned());
                *hook_record.message.lock() = message;
                *hook_record.location.lock() = info
                    .location()
                    .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
                ::tracing::error!("Panic: {:?}", hook_record.message.lock());
                orig_hook(info);
            }));

            let runtime = ::tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .start_paused(true)
                .build()
                .expect("failed to build paused Tokio runtime for test");

            let result = runtime.block_on(async {
                let test_span = ::tracing::info_span!("acton_stopwatch_test", name = stringify!(#name));
                let _enter = test_span.enter();
                #async_name().await
            });

            if record.occurred.load(Ordering::SeqCst) {
                let message = record
                    .message
                    .lock()
                    .clone()
                    .unwrap_or_else(|| "No error message".to_string())
                    .trim()
                    .replace('\n', " ");
                let location = record
                    .location
                    .lock()
                    .clone()
                    .unwrap_or_else(|| "unknown location".to_string());
                panic!("Panic at {}: {}", location, message);
            }

            result.unwrap()
        }

        async fn #async_name(#inputs) #output #body
    };

    output.into()
}
