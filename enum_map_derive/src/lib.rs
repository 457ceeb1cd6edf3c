extern crate proc_macro;

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident};

/// Derive macro for the [Enumerable](https://docs.rs/enum_map/trait.Enumerable.html) trait.
///
/// This properly derives the trait and upholds all the safety invariants:
/// members are numbered consecutively from zero in declaration order, and the
/// generated iterator yields each of them exactly once.
///
/// Enums with data-carrying variants, generic parameters, or explicit
/// discriminants are rejected with a compile error. Renumbering an enum like
/// `enum E { A = 3 }` would silently change which slot a member maps to, so it
/// is refused instead of coerced.
///
/// In addition to `Enumerable`, the macro generates a `{Name}Fields` trait
/// implemented for `EnumMap<{Name}, V, N>` with one accessor triple per
/// member. For a variant `Water` these are `water()`, `water_mut()` and
/// `set_water()`. The expansion refers to `Enumerable` and `EnumMap` by name,
/// so both must be in scope where the derive is used.
#[proc_macro_derive(Enumerable)]
pub fn enumerable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
  let ast = syn::parse_macro_input!(input as DeriveInput);

  derive(&ast).unwrap_or_else(|err| err.to_compile_error()).into()
}

fn derive(ast: &DeriveInput) -> syn::Result<TokenStream> {
  let name = &ast.ident;
  let vis = &ast.vis;

  if !ast.generics.params.is_empty() {
    // Unit variants cannot mention a parameter, so a generic key enum could
    // never compile anyway. Reject it with a readable message instead.
    return Err(syn::Error::new(
      Span::call_site(),
      "This macro doesn't support enums with generic parameters. \
             Members must be plain unit variants.",
    ));
  }

  let variants = match &ast.data {
    Data::Enum(e) => &e.variants,
    _ => {
      return Err(syn::Error::new(
        Span::call_site(),
        "This macro only supports enums with unit variants",
      ))
    }
  };

  let mut from_ordinal_arms = Vec::new();
  let mut to_ordinal_arms = Vec::new();
  let mut accessor_decls = Vec::new();
  let mut accessor_impls = Vec::new();
  for (ordinal, variant) in variants.iter().enumerate() {
    if !matches!(variant.fields, Fields::Unit) {
      return Err(syn::Error::new_spanned(
        variant,
        "This macro doesn't support enums with data. Members must be plain unit variants.",
      ));
    }
    if let Some((_, discriminant)) = &variant.discriminant {
      return Err(syn::Error::new_spanned(
        discriminant,
        "This macro doesn't support explicit discriminants. \
               Members must be numbered consecutively starting at 0.",
      ));
    }

    let ident = &variant.ident;
    from_ordinal_arms.push(quote! { #ordinal => ::core::option::Option::Some(#name::#ident) });
    to_ordinal_arms.push(quote! { #name::#ident => #ordinal });

    let field = snake_case(&ident.to_string());
    let getter = Ident::new(&field, ident.span());
    let getter_mut = Ident::new(&format!("{field}_mut"), ident.span());
    let setter = Ident::new(&format!("set_{field}"), ident.span());
    accessor_decls.push(quote! {
      fn #getter(&self) -> &Self::Value;
      fn #getter_mut(&mut self) -> &mut Self::Value;
      fn #setter(&mut self, value: Self::Value);
    });
    accessor_impls.push(quote! {
      #[inline(always)]
      fn #getter(&self) -> &V {
        &self[#name::#ident]
      }
      #[inline(always)]
      fn #getter_mut(&mut self) -> &mut V {
        &mut self[#name::#ident]
      }
      #[inline(always)]
      fn #setter(&mut self, value: V) {
        self[#name::#ident] = value;
      }
    });
  }

  let count = from_ordinal_arms.len();
  let iter_name = Ident::new(&format!("{name}EnumerableIter"), Span::call_site());
  let fields_name = Ident::new(&format!("{name}Fields"), Span::call_site());

  Ok(quote! {
      #[allow(missing_docs)]
      #vis struct #iter_name {
          ordinal: usize,
          back_ordinal: usize,
      }

      impl #iter_name {
          fn get(&self, ordinal: usize) -> ::core::option::Option<#name> {
              match ordinal {
                  #(#from_ordinal_arms,)*
                  _ => ::core::option::Option::None,
              }
          }
      }

      #[allow(missing_docs)]
      impl #name {
          pub fn iter() -> #iter_name {
              #iter_name {
                  ordinal: 0,
                  back_ordinal: 0,
              }
          }
          pub const fn count() -> usize {
              #count
          }
      }

      impl ::core::iter::Iterator for #iter_name {
          type Item = #name;

          fn next(&mut self) -> ::core::option::Option<Self::Item> {
              self.nth(0)
          }

          fn size_hint(&self) -> (usize, ::core::option::Option<usize>) {
              let remaining = #count.saturating_sub(self.ordinal + self.back_ordinal);
              (remaining, ::core::option::Option::Some(remaining))
          }

          fn nth(&mut self, n: usize) -> ::core::option::Option<Self::Item> {
              let ordinal = self.ordinal + n + 1;
              if ordinal + self.back_ordinal > #count {
                  // Freeze ordinal at #count so that repeated calls past the
                  // end cannot overflow it.
                  self.ordinal = #count;
                  ::core::option::Option::None
              } else {
                  self.ordinal = ordinal;
                  self.get(ordinal - 1)
              }
          }
      }

      impl ::core::iter::ExactSizeIterator for #iter_name {
          fn len(&self) -> usize {
              self.size_hint().0
          }
      }

      impl ::core::iter::DoubleEndedIterator for #iter_name {
          fn next_back(&mut self) -> ::core::option::Option<Self::Item> {
              let back_ordinal = self.back_ordinal + 1;
              if self.ordinal + back_ordinal > #count {
                  // Same freeze as in nth, from the back.
                  self.back_ordinal = #count;
                  ::core::option::Option::None
              } else {
                  self.back_ordinal = back_ordinal;
                  self.get(#count - self.back_ordinal)
              }
          }
      }

      impl ::core::clone::Clone for #iter_name {
          fn clone(&self) -> #iter_name {
              #iter_name {
                  ordinal: self.ordinal,
                  back_ordinal: self.back_ordinal,
              }
          }
      }

      #[allow(unsafe_code)]
      unsafe impl Enumerable for #name {
          const COUNT: usize = Self::count();
          type Iter = #iter_name;
          fn ordinal(self) -> usize {
              match self {
                  #(#to_ordinal_arms,)*
              }
          }
          fn iter() -> Self::Iter {
              Self::iter()
          }
      }

      #[allow(missing_docs)]
      #vis trait #fields_name {
          type Value;
          #(#accessor_decls)*
      }

      impl<V, const N: usize> #fields_name for EnumMap<#name, V, N> {
          type Value = V;
          #(#accessor_impls)*
      }
  })
}

fn snake_case(ident: &str) -> String {
  let mut out = String::new();
  let mut prev_lower = false;
  for c in ident.chars() {
    if c.is_uppercase() {
      if prev_lower {
        out.push('_');
      }
      out.extend(c.to_lowercase());
      prev_lower = false;
    } else {
      prev_lower = c.is_lowercase() || c.is_ascii_digit();
      out.push(c);
    }
  }
  out
}
