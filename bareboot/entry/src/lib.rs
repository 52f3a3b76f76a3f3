//! The `#[entry]` attribute: turns a kernel's main routine into the image's
//! first instructions.
//!
//! ```ignore
//! #[entry]
//! fn kmain() -> ! {
//!     loop {}
//! }
//! ```
//!
//! expands to the function itself, a shim that zeroes `.bss` through
//! `boot::handoff`, and a `_start` symbol in `.text.boot` that does nothing
//! but load `__stack_top` into the stack pointer and jump to the shim. The
//! crate using the attribute must depend on `boot`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Error, ItemFn, ReturnType, Type};

#[proc_macro_attribute]
pub fn entry(attr: TokenStream, fun: TokenStream) -> TokenStream {
    expand(attr.into(), fun.into())
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand(attr: TokenStream2, fun: TokenStream2) -> syn::Result<TokenStream2> {
    if !attr.is_empty() {
        return Err(Error::new(attr.span(), "`#[entry]` takes no arguments"));
    }
    let entry_fun: ItemFn = syn::parse2(fun)?;
    check_signature(&entry_fun)?;

    let name = &entry_fun.sig.ident;
    Ok(quote! {
        #[cfg_attr(not(target_os = "none"), allow(dead_code))]
        #entry_fun

        #[cfg(target_os = "none")]
        #[doc(hidden)]
        extern "C" fn __bareboot_start() -> ! {
            // SAFETY: Only reachable from `_start`, once, with the linker's layout.
            unsafe { ::boot::handoff(::boot::BootLayout::from_linker(), #name) }
        }

        #[cfg(all(target_os = "none", any(target_arch = "riscv32", target_arch = "riscv64")))]
        ::core::arch::global_asm!(
            ".pushsection .text.boot, \"ax\"",
            ".global _start",
            "_start:",
            "  la sp, __stack_top",
            "  j {start}",
            ".popsection",
            start = sym __bareboot_start,
        );

        #[cfg(all(target_os = "none", target_arch = "x86"))]
        ::core::arch::global_asm!(
            ".pushsection .text.boot, \"ax\"",
            ".global _start",
            "_start:",
            "  mov esp, offset __stack_top",
            "  jmp {start}",
            ".popsection",
            start = sym __bareboot_start,
        );
    })
}

fn check_signature(entry_fun: &ItemFn) -> syn::Result<()> {
    let sig = &entry_fun.sig;
    if let Some(attr) = entry_fun
        .attrs
        .iter()
        .find(|attr| !attr.path().is_ident("doc"))
    {
        return Err(Error::new(
            attr.span(),
            "Attributes are not allowed on entry function",
        ));
    }
    if let Some(abi) = &sig.abi {
        return Err(Error::new(
            abi.span(),
            "Entry function must not specify an ABI",
        ));
    }
    if let Some(constness) = &sig.constness {
        return Err(Error::new(
            constness.span(),
            "Entry function may not be `const`",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new(
            asyncness.span(),
            "Entry function may not be `async`",
        ));
    }
    if let Some(unsafety) = &sig.unsafety {
        return Err(Error::new(
            unsafety.span(),
            "Entry function may not be `unsafe`",
        ));
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(Error::new(
            sig.generics.span(),
            "Entry function may not be generic",
        ));
    }
    if !sig.inputs.is_empty() || sig.variadic.is_some() {
        return Err(Error::new(
            sig.inputs.span(),
            "Entry function takes no arguments",
        ));
    }
    match &sig.output {
        ReturnType::Type(_, ty) if matches!(**ty, Type::Never(_)) => Ok(()),
        output => Err(Error::new(
            output.span(),
            "Entry function must diverge (i.e. `-> !`)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn expand_ok(fun: TokenStream2) -> String {
        expand(TokenStream2::new(), fun).unwrap().to_string()
    }

    fn expand_err(fun: TokenStream2) -> String {
        expand(TokenStream2::new(), fun).unwrap_err().to_string()
    }

    #[test]
    fn emits_riscv_trampoline() {
        let out = expand_ok(quote! { fn kmain() -> ! { loop {} } });
        assert!(out.contains("\"_start:\""));
        assert!(out.contains("\"  la sp, __stack_top\""));
        assert!(out.contains("\"  j {start}\""));
    }

    #[test]
    fn emits_x86_trampoline() {
        let out = expand_ok(quote! { fn kmain() -> ! { loop {} } });
        assert!(out.contains("\"  mov esp, offset __stack_top\""));
        assert!(out.contains("\"  jmp {start}\""));
    }

    #[test]
    fn shim_zeroes_bss_then_calls_main() {
        let out = expand_ok(quote! { fn kmain() -> ! { loop {} } });
        assert!(out.contains("extern \"C\" fn __bareboot_start"));
        assert!(out.contains("handoff"));
        assert!(out.contains("BootLayout :: from_linker ()"));
        assert!(out.contains("kmain)"));
        assert!(out.contains(".text.boot"));
    }

    #[test]
    fn keeps_the_function() {
        let out = expand_ok(quote! {
            /// Docs are fine.
            fn kmain() -> ! { loop {} }
        });
        assert!(out.contains("fn kmain () -> !"));
    }

    #[test]
    fn rejects_arguments() {
        let err = expand_err(quote! { fn kmain(a: usize) -> ! { loop {} } });
        assert_eq!(err, "Entry function takes no arguments");
    }

    #[test]
    fn rejects_returning_functions() {
        let err = expand_err(quote! { fn kmain() {} });
        assert_eq!(err, "Entry function must diverge (i.e. `-> !`)");
        let err = expand_err(quote! { fn kmain() -> usize { 0 } });
        assert_eq!(err, "Entry function must diverge (i.e. `-> !`)");
    }

    #[test]
    fn rejects_abi_and_qualifiers() {
        let err = expand_err(quote! { extern "C" fn kmain() -> ! { loop {} } });
        assert_eq!(err, "Entry function must not specify an ABI");
        let err = expand_err(quote! { unsafe fn kmain() -> ! { loop {} } });
        assert_eq!(err, "Entry function may not be `unsafe`");
        let err = expand_err(quote! { async fn kmain() -> ! { loop {} } });
        assert_eq!(err, "Entry function may not be `async`");
        let err = expand_err(quote! { fn kmain<T>() -> ! { loop {} } });
        assert_eq!(err, "Entry function may not be generic");
    }

    #[test]
    fn rejects_other_attributes() {
        let err = expand_err(quote! {
            #[inline(never)]
            fn kmain() -> ! { loop {} }
        });
        assert_eq!(err, "Attributes are not allowed on entry function");
    }

    #[test]
    fn rejects_attribute_arguments() {
        let err = expand(quote! { stack = 4096 }, quote! { fn kmain() -> ! { loop {} } })
            .unwrap_err()
            .to_string();
        assert_eq!(err, "`#[entry]` takes no arguments");
    }
}
