use proc_macro::{self, TokenStream};
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, FnArg, Ident, ItemFn, LitStr, PatType, Type};

/// Turns a function into a record member.
///
/// The function takes the receiving record as `&Record`, then any number of
/// `&Value` arguments, optionally followed by a `Vec<Value>` collecting the
/// rest, and returns `Result<Value, Condition>`. Next to it a function named
/// `<fn>_method` is generated, returning the member as a `Procedure` ready to
/// be bound in a record body. The member name defaults to the function name.
#[proc_macro_attribute]
pub fn method(name: TokenStream, item: TokenStream) -> TokenStream {
    let method = parse_macro_input!(item as ItemFn);

    let impl_name = method.sig.ident.clone();
    let name = if name.is_empty() {
        impl_name.to_string()
    } else {
        parse_macro_input!(name as LitStr).value()
    };
    let wrapper_name = Ident::new(&format!("{impl_name}_method"), Span::call_site());
    let vis = method.vis.clone();

    if method.sig.inputs.is_empty() {
        return syn::Error::new_spanned(
            &method.sig,
            "a record method must take the receiving record as its first argument",
        )
        .to_compile_error()
        .into();
    }

    let is_variadic = method.sig.inputs.len() > 1
        && method.sig.inputs.last().map(is_vec).unwrap_or(false);

    // The receiver counts towards the required arguments.
    let num_args = if is_variadic {
        method.sig.inputs.len() - 1
    } else {
        method.sig.inputs.len()
    };
    let arg_indices: Vec<_> = (1..num_args).collect();

    let body = if is_variadic {
        quote! {
            let (required, rest) = args.split_at(#num_args);
            let this: &::autorecord::records::Record = (&required[0]).try_into()?;
            #impl_name(this, #( &required[#arg_indices], )* rest.to_vec())
        }
    } else {
        quote! {
            let this: &::autorecord::records::Record = (&args[0]).try_into()?;
            #impl_name(this, #( &args[#arg_indices], )*)
        }
    };

    quote! {
        #method

        #vis fn #wrapper_name() -> ::autorecord::proc::Procedure {
            ::autorecord::proc::Procedure::new(
                #name,
                #num_args,
                #is_variadic,
                |args: &[::autorecord::value::Value]| { #body },
            )
        }
    }
    .into()
}

fn is_vec(arg: &FnArg) -> bool {
    if let FnArg::Typed(PatType { ty, .. }) = arg {
        if let Type::Path(ref path) = ty.as_ref() {
            return path
                .path
                .segments
                .last()
                .map(|p| p.ident.to_string())
                .as_deref()
                == Some("Vec");
        }
    }
    false
}
